// peerchat-web-host library
// Native host process: owns the settings document and the peer dialer,
// serves the browser UI over HTTP and talks to it over a WebSocket bridge.

// Settings bridge (WebSocket)
pub mod bridge;

// Configuration
pub mod config;

// Embedded UI assets (single-binary distribution)
pub mod embedded;

// HTTP server for UI assets and the small REST surface
pub mod http;

// Outbound peer connections
pub mod peers;

// Settings persistence
pub mod settings;
