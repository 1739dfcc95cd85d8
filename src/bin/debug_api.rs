//! Manual probe of the helpdesk wire contract. Prints raw responses so
//! schema drift is visible without the dashboard in the way.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = helpdeck::config::load(None)?;
    let base_url = &config.server.base_url;

    println!("Ticket service: {}", base_url);

    println!("\n=== GET /api/health ===");
    probe(&format!("{}/api/health", base_url)).await;

    println!("\n=== GET /api/tickets ===");
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/api/tickets", base_url))
        .send()
        .await;

    match response {
        Ok(resp) => {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            println!("Status: {}", status);
            if status.is_success() {
                match serde_json::from_str::<Vec<helpdeck::data::Ticket>>(&body) {
                    Ok(tickets) => {
                        println!("Parsed {} tickets:", tickets.len());
                        for t in tickets.iter().take(10) {
                            println!(
                                "  #{} [{}] [{}] {} ({})",
                                t.id,
                                t.status.label(),
                                t.priority.label(),
                                t.title,
                                t.created_at
                            );
                        }
                    }
                    Err(e) => {
                        println!("Body did not parse as tickets: {}", e);
                        println!("Raw: {}", &body[..body.len().min(500)]);
                    }
                }
            } else {
                println!("Error body: {}", body);
            }
        }
        Err(e) => println!("Request failed: {}", e),
    }

    Ok(())
}

async fn probe(url: &str) {
    let client = reqwest::Client::new();
    match client.get(url).send().await {
        Ok(resp) => {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            println!("Status: {}", status);
            println!("Body: {}", &body[..body.len().min(500)]);
        }
        Err(e) => println!("Request failed: {}", e),
    }
}
