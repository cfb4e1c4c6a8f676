pub mod challenge;
pub mod connection;
pub mod content_encoding;
pub mod content_type;
pub mod cookie;
pub mod date;
pub mod digest;
pub mod link;
pub mod transfer_encoding;

pub use challenge::Challenge;
pub use connection::parse_keep_alive;
pub use content_encoding::ContentEncoding;
pub use content_type::ContentType;
pub use cookie::Cookie;
pub use digest::DigestHeader;
pub use link::{Link, LinkRel};
pub use transfer_encoding::TransferEncoding;
