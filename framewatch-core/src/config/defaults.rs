//! Default configuration values
//!
//! Printed by `framewatch-demo --print-config` as a starting point.

/// Default configuration as TOML
pub const DEFAULT_CONFIG_TOML: &str = r##"
# framewatch configuration

[logging]
enabled = true
min_level = "info"          # info | warning | error | exception
console = true
memory_capacity = 0

[logging.file]
enabled = false
# path = "/var/log/framewatch.jsonl"
max_file_size_mb = 10
max_rotated_files = 5

[sampler]
tag = "Performance"
window_secs = 1.0
max_frame_secs = 0.033      # 30fps budget
max_memory_bytes = 104857600
physics_target_secs = 0.02
gc_report_threshold_bytes = 1048576
rendering_stats = false
"##;
