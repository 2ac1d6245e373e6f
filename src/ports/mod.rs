/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports describe what the application core needs from the
/// outside world: the results backend, public lookup services, the API key
/// store, and the output side (formatting, presenting, progress).
pub mod outbound;
