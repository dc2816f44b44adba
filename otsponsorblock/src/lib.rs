//! # otsponsorblock - Client SponsorBlock pour OTMusic
//!
//! Cette crate fournit un client Rust pour l'API SponsorBlock, qui recense
//! les segments à sauter (sponsors, auto-promotion, passages hors sujet)
//! signalés par la communauté.
//!
//! ## Vue d'ensemble
//!
//! - Récupération des segments d'une vidéo par catégories et actions
//! - Une vidéo sans signalement retourne une liste vide (jamais une erreur)
//! - Intégration avec la configuration OTMusic (catégories par défaut)
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use otsponsorblock::{Action, Category, SponsorBlockClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = SponsorBlockClient::new()?;
//!     let segments = client
//!         .segments(
//!             "zqNTltOGh5c",
//!             &[Category::Sponsor, Category::MusicOfftopic],
//!             &[Action::Skip],
//!             &[],
//!         )
//!         .await?;
//!
//!     for segment in segments {
//!         println!("skip {:.1}s-{:.1}s ({:?})", segment.start(), segment.end(), segment.category);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod models;

pub use client::SponsorBlockClient;
pub use error::{Result, SponsorBlockError};
pub use models::{Action, Category, Segment, SegmentBounds};
