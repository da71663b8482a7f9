//! # Project Hub
//!
//! A searchable gallery of student projects. Projects come from a published
//! spreadsheet (CSV) plus one built-in example, and are served as an HTML
//! gallery with a JSON API alongside.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────┐   ┌──────────┐
//! │ CSV source  │──▶│  Ingest  │──▶│ Catalog  │
//! │ HTTP / file │   │ rows→rec │   │  (task)  │
//! └─────────────┘   └──────────┘   └────┬─────┘
//!                                       │ snapshots
//!                      ┌────────────────┤
//!                      ▼                ▼
//!                 ┌──────────┐    ┌──────────┐
//!                 │   CLI    │    │   HTTP   │
//!                 │  (hub)   │    │ gallery  │
//!                 └──────────┘    └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! hub list --search jane        # print matching projects
//! hub show 1                    # print one project's details
//! hub export --output all.json  # dump every record as JSON
//! hub serve                     # start the gallery server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | The project record and the built-in example |
//! | [`sources`] | HTTP and file CSV sources |
//! | [`ingest`] | CSV parsing and projection into records |
//! | [`search`] | Substring filtering |
//! | [`detail`] | Detail view, timestamp formatting, link actions |
//! | [`catalog`] | Task owning the current record list |
//! | [`render`] | HTML pages |
//! | [`server`] | HTTP routes |
//! | [`export`] | JSON export |

pub mod catalog;
pub mod config;
pub mod detail;
pub mod export;
pub mod ingest;
pub mod models;
pub mod render;
pub mod search;
pub mod server;
pub mod sources;
