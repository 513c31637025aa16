pub mod shared;
pub mod crc;
pub mod common;
pub mod cvar;
pub mod world;
pub mod collide;
pub mod pmove;
