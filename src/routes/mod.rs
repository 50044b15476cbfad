/// Router Module Index
///
/// Organizes the routing surface by required role, mirroring the
/// authorization matrix: which routes a caller may reach is decided by the
/// module the route lives in plus the role check inside its handler.

/// Unauthenticated routes (health probe only).
pub mod public;

/// Read-only planet routes, reachable with the USER or ADMIN role.
pub mod reader;

/// Write routes, restricted to the ADMIN role.
pub mod admin;
