//! # TUI Components
//!
//! Stateless components receive everything as props and are rebuilt each
//! frame:
//! - `TitleBar`: app name and contextual hints
//! - `LandingPage`: empty-transcript placeholder
//! - `Message`: one chat turn
//! - `Toast`: notification overlay
//! - `UrlBar`: wraps the persistent URL field with a status box
//!
//! Stateful components keep their state in `TuiState` across frames:
//! - `TextField`: editable input used by the URL bar and the composer
//! - `MessageList`: scrollable transcript with layout caching
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── landing.rs
//! ├── message.rs
//! ├── message_list.rs
//! ├── toast.rs
//! ├── url_bar.rs
//! └── text_field/
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod landing;
pub mod message;
pub mod message_list;
pub mod text_field;
pub mod toast;
pub mod url_bar;

pub use landing::LandingPage;
pub use message_list::{MessageList, MessageListState};
pub use text_field::{FieldEvent, TextField};
pub use toast::Toast;
pub use url_bar::UrlBar;
