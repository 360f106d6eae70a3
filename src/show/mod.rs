// show/ - Page sequencing around the fireworks
//
// Countdown to the target instant, timed launch volleys, pointer
// parallax, and the wish deck behind the gift popups. No DOM here;
// `web` applies the results to the page.

mod countdown;
mod parallax;
mod salvo;
mod wishes;

pub use countdown::{Countdown, Phase, Remaining};
pub use parallax::Parallax;
pub use salvo::Salvo;
pub use wishes::WishDeck;
