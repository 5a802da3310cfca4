//! # html-shelf
//!
//! Keeps private copies of imported HTML documents and the small catalog
//! that describes them.
//!
//! ```no_run
//! use html_shelf::color::Palette;
//! use html_shelf::state::{Catalog, PresentationList};
//!
//! let catalog = Catalog::open("/tmp/shelf", Palette::default());
//! let entry = catalog
//!     .import_content("<h1>Hi</h1>".as_bytes(), "hello.html")
//!     .expect("import");
//! catalog.toggle_pin(&entry.id).expect("pin");
//!
//! for entry in PresentationList::load(&catalog).iter() {
//!     println!("{} {}", entry.pinned, entry.display_name);
//! }
//! ```

pub mod color;
pub mod config;
pub mod state;
pub mod ui;
