//! Internal constants for diagram conversion.

/// File extension of PlantUML diagram sources.
pub const DIAGRAM_EXTENSION: &str = "puml";

/// File extension of assembled Draw.io documents.
pub const OUTPUT_EXTENSION: &str = "drawio";
