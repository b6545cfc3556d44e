//! Chat client core for the Korean legal-information assistant.
//!
//! DESIGN
//! ======
//! One turn flows through the modules leaf-first: `session` gates the single
//! outstanding request, `transport` performs the HTTP exchange, `format`
//! renders the reply (resolving citations through `source`) into an
//! escaped-by-default `html` fragment, and `view` appends it to the log.
//! Nothing here is process-global; the caller owns the session and view.

pub mod category;
pub mod download;
pub mod format;
pub mod html;
pub mod session;
pub mod source;
pub mod transport;
pub mod view;

pub use category::Category;
pub use session::{ChatSession, SessionError, Turn, TurnError};
pub use transport::types::{ChatReply, ChatTransport, TransportError};
pub use view::ChatView;
