use riskboard_core::advisor::expand::expand_flagged_resources;
use riskboard_core::advisor::parser::parse_findings_document;
use riskboard_core::board::urgency::count_by_status;
use riskboard_core::catalog::CheckCatalog;
use serde_json::json;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: document_validator <path/to/findings.json> [path/to/check_catalog.json]");
        std::process::exit(2);
    }

    let catalog = if args.len() > 2 {
        let text = match std::fs::read_to_string(&args[2]) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("catalog read error: {}", e);
                std::process::exit(2);
            }
        };
        match CheckCatalog::from_json(&text) {
            Ok(catalog) => catalog,
            Err(e) => {
                eprintln!("catalog invalid: {}", e);
                std::process::exit(2);
            }
        }
    } else {
        CheckCatalog::builtin()
    };

    let text = match std::fs::read_to_string(&args[1]) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("document read error: {}", e);
            std::process::exit(1);
        }
    };

    match parse_findings_document(&text) {
        Ok(findings) => {
            let expanded = expand_flagged_resources(&findings, &catalog);
            let counts = count_by_status(expanded.items.iter());
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "result": "PASS",
                    "check_count": expanded.check_count,
                    "expanded_count": expanded.items.len(),
                    "unknown_check_ids": expanded.unknown_check_ids,
                    "urgency": {
                        "high": counts.high,
                        "medium": counts.medium,
                        "low": counts.low
                    }
                }))
                .unwrap()
            );
        }
        Err(e) => {
            eprintln!("document invalid: {}", e);
            std::process::exit(1);
        }
    }
}
