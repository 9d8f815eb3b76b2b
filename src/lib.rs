//! # Bike Share
//!
//! > **A bike-sharing back end built from resource-oriented actors.**
//!
//! Bikes, stations, member accounts and rentals each live in their own
//! [`ResourceActor`](actor_framework::ResourceActor). The [`coordinator`] runs the rent and
//! return use cases across them; the actors never call each other.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! Plain domain types: [`Bike`](model::Bike), [`Station`](model::Station) and its
//! [`Slot`](model::Slot)s, [`Account`](model::Account), [`Rental`](model::Rental), plus
//! [`Money`](model::Money) and the billing [`Tariff`](model::Tariff).
//!
//! ### 2. The Actors ([`bike_actor`], [`station_actor`], [`account_actor`], [`rental_actor`])
//! `ActorEntity` implementations. Each action is one atomic step on one resource, such as
//! "mark this bike Rented if it is Available" or "unlock the slot whose code matches".
//!
//! ### 3. The Interface ([`clients`])
//! Typed wrappers around `ResourceClient` with one method per action.
//!
//! ### 4. The Use Cases ([`coordinator`])
//! [`RentalCoordinator`](coordinator::RentalCoordinator): rent, return, docking and the
//! read-only station and rental views.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`BikeShareSystem`](lifecycle::BikeShareSystem) starts the actors from
//! [`BikeShareSettings`](lifecycle::BikeShareSettings) and shuts them down.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Bill the first 10 minutes free at 20 cents a minute
//! BIKESHARE_FREE_MINUTES=10 BIKESHARE_RATE_CENTS_PER_MINUTE=20 cargo run
//! ```

pub mod account_actor;
pub mod bike_actor;
pub mod clients;
pub mod coordinator;
pub mod lifecycle;
pub mod model;
pub mod rental_actor;
pub mod station_actor;
