//! Client core for the veterinary clinic admin console.
//!
//! # Overview
//! Talks to the clinic's REST backend (`/api/clientes`, `/api/funcionarios`,
//! `/api/pets`, `/api/produtos`), normalizes its inconsistent response
//! envelopes, and drives one list/modal controller per entity.
//!
//! # Design
//! - `ApiClient` splits every call into `build_request` and `parse_response`
//!   around a pluggable `Transport`, so parsing is testable without a server.
//! - Entity types describe themselves through a `Schema`; a single generic
//!   `EntityController` serves all four of them.
//! - The view is a projection of an `EntityStore`. Rendering a table never
//!   changes state.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod confirm;
pub mod controller;
pub mod entity;
pub mod envelope;
pub mod error;
pub mod form;
pub mod http;
pub mod notify;
pub mod tabs;
pub mod transport;
pub mod view;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use confirm::Confirm;
pub use controller::{EntityController, FormMode, ModalState, Panel};
pub use entity::{Client, Employee, Entity, Pet, Product, Schema};
pub use envelope::EnvelopePolicy;
pub use error::{ApiError, FormError, TransportError};
pub use form::FormData;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use notify::{MemoryNotifier, Notification, NotificationKind, Notifier};
pub use tabs::{AdminPanel, Tab};
pub use transport::{Transport, UreqTransport};
pub use view::{EntityStore, LoadStatus, Table};
