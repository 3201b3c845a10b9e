/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound (driven) ports describe everything the audit core needs from
/// the outside world: a shell to run Juju commands in, vulnerability
/// reference data, a scanner, and places to put the results.
pub mod outbound;
