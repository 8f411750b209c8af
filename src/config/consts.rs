// src/config/consts.rs

// Net config
pub const DOCS_BASE: &str = "https://docs.flightsimulator.com/html/Programming_Tools/SimVars/";
pub const USER_AGENT: &str = concat!("msfs_simvars/", env!("CARGO_PKG_VERSION"));
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Documentation pages: (topic, path under DOCS_BASE).
pub const SIMVAR_PAGES: &[(&str, &str)] = &[
    ("Aircraft_AutopilotAssistant_Variables", "Aircraft_SimVars/Aircraft_AutopilotAssistant_Variables.htm"),
    ("Aircraft_Brake_Landing_Gear_Variables", "Aircraft_SimVars/Aircraft_Brake_Landing_Gear_Variables.htm"),
    ("Aircraft_Control_Variables", "Aircraft_SimVars/Aircraft_Control_Variables.htm"),
    ("Aircraft_Electrics_Variables", "Aircraft_SimVars/Aircraft_Electrics_Variables.htm"),
    ("Aircraft_Engine_Variables", "Aircraft_SimVars/Aircraft_Engine_Variables.htm"),
    ("Aircraft_FlightModel_Variables", "Aircraft_SimVars/Aircraft_FlightModel_Variables.htm"),
    ("Aircraft_Fuel_Variables", "Aircraft_SimVars/Aircraft_Fuel_Variables.htm"),
    ("Aircraft_Misc_Variables", "Aircraft_SimVars/Aircraft_Misc_Variables.htm"),
    ("Aircraft_RadioNavigation_Variables", "Aircraft_SimVars/Aircraft_RadioNavigation_Variables.htm"),
    ("Aircraft_System_Variables", "Aircraft_SimVars/Aircraft_System_Variables.htm"),
    ("Helicopter_Variables", "Helicopter_Variables.htm"),
    ("Camera_Variables", "Camera_Variables.htm"),
    ("Miscellaneous_Variables", "Miscellaneous_Variables.htm"),
    ("Services_Variables", "Services_Variables.htm"),
];

// Harvest
pub const PAGE_PAUSE_MS: u64 = 1_000;
pub const PAGE_JITTER_MS: u64 = 1_300; // extra 0..1300 ms between pages
pub const MERGED_STEM: &str = "msfs2020_sim_vars";

// Column names, as published in the docs
pub const COL_TOPIC: &str = "topic";
pub const COL_NAME: &str = "Simulation Variable";
pub const COL_VALUE: &str = "value";
pub const COL_UNITS: &str = "Units";
pub const COL_DESCRIPTION: &str = "Description";

// Export
pub const FIELD_SEP: char = ';';
pub const HARVEST_NA: &str = "NA";
pub const SCAN_NA: &str = "na";

// Scan
pub const TARGET_PROCESS: &str = "FlightSimulator";
pub const DEFAULT_SIM_NAME: &str = "simvars";
pub const DEFAULT_INDEXES: &[u32] = &[1];
pub const INDEX_TOKEN: &str = "index";
pub const QUERY_PAUSE_MS: u64 = 200; // source polling constraint
