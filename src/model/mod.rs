mod asset_link;
mod descriptor;
mod event;


pub use asset_link::*;
pub use descriptor::*;
pub use event::*;
