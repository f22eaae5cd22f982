// movesys-api: resilient async HTTP transport for the MoveSys logistics API

pub mod endpoint;
pub mod error;
pub mod session;
pub mod transport;

pub use endpoint::{Params, ResourceEndpoint};
pub use error::Error;
pub use session::{LoginRedirect, MemorySession, NoRedirect, RedirectSignal, Session, SessionStore};
pub use transport::{ApiResponse, Request, Transport, TransportConfig};

pub use reqwest::{Method, StatusCode};
