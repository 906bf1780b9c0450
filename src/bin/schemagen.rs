//! Generate the JSON schema of the SDDC resource model.
//!
//! Usage: `cargo run --bin schemagen > schema/sddc.json`

use sddc_controller::model::ResourceModel;

fn main() -> anyhow::Result<()> {
    let schema = schemars::schema_for!(ResourceModel);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
