/// Data layer: record types, query construction, and the remote client.
///
/// Architecture:
/// ```text
///   FilterState (form input)
///        │
///        ▼
///   ┌──────────┐
///   │  query    │  build SoQL filter + description
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  client   │  GET data.nasa.gov → Vec<MeteoriteRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  MeteoriteRecord, Geolocation
///   └──────────┘
/// ```

pub mod client;
pub mod model;
pub mod query;
