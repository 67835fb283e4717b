pub mod decode;
pub mod init;
pub mod path;
pub mod replay;

pub use decode::{decode, DecodeArgs};
pub use init::{init, InitArgs};
pub use path::{path, PathArgs};
pub use replay::{replay, ReplayArgs};
