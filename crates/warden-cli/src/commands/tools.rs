pub fn run(name: Option<&str>) -> anyhow::Result<()> {
    let defs = warden_core::tool_definitions();

    match name {
        Some(name) => {
            let def = defs
                .iter()
                .find(|def| def["name"] == name)
                .ok_or_else(|| anyhow::anyhow!("Unknown tool: {name}"))?;
            println!("name: {}", def["name"].as_str().unwrap_or_default());
            println!("description: {}", def["description"].as_str().unwrap_or_default());
            println!("parameters:");
            println!("{}", serde_json::to_string_pretty(&def["parameters"])?);
        }
        None => {
            println!("Guarded tools ({}):", defs.len());
            for def in &defs {
                println!(
                    "{} - {}",
                    def["name"].as_str().unwrap_or_default(),
                    def["description"].as_str().unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}
