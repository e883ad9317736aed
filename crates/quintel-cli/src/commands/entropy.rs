use quintel_core::{Generated, ValueKind, generate};

pub fn run(seed: Option<&str>, count: usize, kind: &str, json: bool) -> Result<(), String> {
    let seed = super::parse_seed(seed)?;
    let kind = match kind {
        "floats" => ValueKind::Floats,
        _ => ValueKind::Bytes,
    };
    log::debug!("generating {count} {kind} values from seed {}", seed.value());

    let generated = generate(seed, count, kind).map_err(|e| e.to_string())?;

    if json {
        let value = match &generated {
            Generated::Bytes(b) => serde_json::json!({
                "seed": seed.value(),
                "kind": "bytes",
                "length": b.len(),
                "data": b,
            }),
            Generated::Floats(f) => serde_json::json!({
                "seed": seed.value(),
                "kind": "floats",
                "length": f.len(),
                "data": f,
            }),
        };
        println!("{}", serde_json::to_string_pretty(&value).unwrap());
        return Ok(());
    }

    println!("Seed: {}  ({} {kind} values)\n", seed.value(), generated.len());
    match &generated {
        Generated::Bytes(bytes) => {
            for chunk in bytes.chunks(16) {
                let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
                println!("  {}", hex.join(" "));
            }
        }
        Generated::Floats(floats) => {
            for chunk in floats.chunks(4) {
                let row: Vec<String> = chunk.iter().map(|f| format!("{f:>12.9}")).collect();
                println!("  {}", row.join("  "));
            }
        }
    }
    Ok(())
}
