use serde_json::json;

use crate::cli::OutputFormat;
use crate::rpc;

pub fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let table = rpc::procedures();

    match output_format {
        OutputFormat::Json => {
            let listed: Vec<_> = table
                .iter()
                .map(|p| {
                    json!({
                        "name": p.name,
                        "kind": p.kind,
                        "method": p.kind.method(),
                        "actor_field": p.actor_field,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json!({ "procedures": listed }))?);
        }
        OutputFormat::Text => {
            println!("{:<28} {:<6} {}", "PROCEDURE", "METHOD", "ACTOR");
            for p in table.iter() {
                println!("{:<28} {:<6} {}", p.name, p.kind.method(), p.actor_field.unwrap_or("-"));
            }
        }
    }
    Ok(())
}
