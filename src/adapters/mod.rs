/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: HTTP clients, the
/// filesystem, the console and the report formatters.
pub mod outbound;
