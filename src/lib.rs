//! junkboard - shareable journal boards behind capability links
//!
//! A board holds dated pages in a user-controlled order; each page holds a
//! z-stacked set of visual elements. Access is granted by possession of one
//! of the board's two secrets: the edit secret allows mutation, the public
//! secret allows reading.
//!
//! Layers, leaves first:
//! - [`access`]: secrets, the token verifier and the access gate
//! - [`ordering`]: dense positional ordering of siblings
//! - [`model`]: boards, pages, elements
//! - [`store`]: transactional board documents
//! - [`service`]: the journal operations
//! - [`http_server`], [`cli`]: the outer surfaces

pub mod access;
pub mod cli;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod ordering;
pub mod service;
pub mod store;
