//! Hazard reporting feature.
//!
//! Users file reports about hazards they observe, optionally with photos.
//! Every endpoint requires a verified session token; the caller's `id` claim
//! becomes the owner of reports they create.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/hazard-reports` | Create a report (multipart, `images` files) |
//! | GET | `/api/hazard-reports` | List every report with count |
//! | GET | `/api/hazard-reports/user` | List the caller's reports with count |
//! | GET | `/api/hazard-reports/{id}` | Get one report |
//! | PUT/PATCH | `/api/hazard-reports/{id}` | Update a report |
//! | DELETE | `/api/hazard-reports/{id}` | Delete a report |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
