use crate::config::{Config, SchedulerConfig, SimulationConfig};
use crate::process::Process;
use crate::simulation::Simulator;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Browser-side settings; anything omitted falls back to the defaults
#[derive(Deserialize, Default)]
#[serde(default)]
struct WasmConfig {
    scheduler: SchedulerConfig,
    max_simulated_time: Option<u64>,
}

/// Run the configured policies over `processes_json` and return the run array
#[wasm_bindgen]
pub fn run_simulation(processes_json: &str, config_json: &str) -> Result<JsValue, JsValue> {
    // Set up better panic messages
    console_error_panic_hook::set_once();

    let processes: Vec<Process> = serde_json::from_str(processes_json)
        .map_err(|e| JsValue::from_str(&format!("Process parse error: {}", e)))?;
    let wasm_config: WasmConfig = if config_json.trim().is_empty() {
        WasmConfig::default()
    } else {
        serde_json::from_str(config_json)
            .map_err(|e| JsValue::from_str(&format!("Config parse error: {}", e)))?
    };

    let defaults = SimulationConfig::default();
    let config = Config {
        scheduler: wasm_config.scheduler,
        simulation: SimulationConfig {
            parallel: false,
            max_simulated_time: wasm_config
                .max_simulated_time
                .unwrap_or(defaults.max_simulated_time),
        },
        workload: None,
        processes,
    };

    let simulator = Simulator::new(config)
        .map_err(|e| JsValue::from_str(&format!("Simulator error: {}", e)))?;
    let report = simulator
        .run_all()
        .map_err(|e| JsValue::from_str(&format!("Simulation error: {}", e)))?;

    Ok(serde_wasm_bindgen::to_value(&report.runs)?)
}
