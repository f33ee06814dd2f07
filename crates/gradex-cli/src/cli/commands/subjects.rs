//! Subject command handlers.

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table};
use gradex_core::api::ApiClient;
use gradex_core::config::Config;
use gradex_types::Subject;

pub async fn list(config: &Config) -> Result<()> {
    let client = ApiClient::new(&config.base_url)?;
    let subjects = client.list_subjects().await.context("list subjects")?;

    if subjects.is_empty() {
        println!("No Subjects found");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(["ID", "Name", "Code"]);
    for subject in &subjects {
        table.add_row(display_fields(subject));
    }
    println!("{table}");
    Ok(())
}

pub async fn show(config: &Config, id: i64) -> Result<()> {
    let client = ApiClient::new(&config.base_url)?;
    let subject = client
        .get_subject(id)
        .await
        .with_context(|| format!("load subject '{id}'"))?;

    let [id, name, code] = display_fields(&subject);
    println!("ID:   {id}");
    println!("Name: {name}");
    println!("Code: {code}");
    Ok(())
}

fn display_fields(subject: &Subject) -> [String; 3] {
    let field = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        subject.id.map(|id| id.to_string()).unwrap_or_default(),
        field(&subject.name),
        field(&subject.code),
    ]
}
