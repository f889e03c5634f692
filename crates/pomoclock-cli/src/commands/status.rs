use pomoclock_core::TimerEngine;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = TimerEngine::new().snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
