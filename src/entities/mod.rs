//! Game entities: the moving sprite base plus the player, obstacle,
//! token, and background variants composed on top of it.

pub mod background;
pub mod image_sprite;
pub mod obstacle;
pub mod player;
pub mod sprite;
pub mod token;
