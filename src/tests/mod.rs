// Test modules for llm-server-smoke
//
// Each source module has a matching test file focused on behavior; shared
// fixtures live in `helpers`.

pub mod helpers;
