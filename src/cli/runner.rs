//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::engine::{Message, SyncConfig};
use crate::error::{Error, Result};
use crate::tap::{Connector, TapRestCountries};
use futures::StreamExt;
use serde_json::{json, Value};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Spec => self.spec(),
            Commands::Check => self.check().await,
            Commands::Discover => self.discover().await,
            Commands::Read {
                output,
                max_records,
            } => self.read(output.as_deref(), *max_records).await,
            Commands::Streams => self.streams(),
        }
    }

    /// Load configuration
    fn load_config(&self) -> Result<Value> {
        // Inline config takes precedence
        if let Some(json_str) = &self.cli.config_json {
            return serde_json::from_str(json_str)
                .map_err(|e| Error::config(format!("Invalid config JSON: {e}")));
        }

        // Load from file
        if let Some(path) = &self.cli.config {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::config(format!("Failed to read config file: {e}")))?;
            return serde_json::from_str(&content)
                .map_err(|e| Error::config(format!("Invalid config JSON: {e}")));
        }

        // Default empty config
        Ok(json!({}))
    }

    /// Show spec
    fn spec(&self) -> Result<()> {
        let spec = TapRestCountries::new().spec();

        self.output_message(&json!({
            "type": "SPEC",
            "spec": {
                "name": spec.name,
                "title": spec.title,
                "description": spec.description,
                "connectionSpecification": spec.config_schema
            }
        }));

        Ok(())
    }

    /// Check connection
    async fn check(&self) -> Result<()> {
        let config = self.load_config()?;
        let tap = TapRestCountries::new();

        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": "Checking connection to tap-restcountries"
            }
        }));

        let result = tap.check(&config).await?;
        if result.success {
            self.output_message(&json!({
                "type": "CONNECTION_STATUS",
                "connectionStatus": {
                    "status": "SUCCEEDED",
                    "message": "Connection successful"
                }
            }));
        } else {
            self.output_message(&json!({
                "type": "CONNECTION_STATUS",
                "connectionStatus": {
                    "status": "FAILED",
                    "message": result.message.unwrap_or_default()
                }
            }));
        }

        Ok(())
    }

    /// Discover streams
    async fn discover(&self) -> Result<()> {
        let tap = TapRestCountries::new();
        let catalog = tap.discover().await?;

        self.output_message(&json!({
            "type": "CATALOG",
            "catalog": serde_json::to_value(&catalog)?
        }));

        Ok(())
    }

    /// Read data
    async fn read(&self, output: Option<&Path>, max_records: Option<usize>) -> Result<()> {
        let sync_start = Instant::now();
        let config = self.load_config()?;

        let mut sync_config = SyncConfig::new();
        if let Some(max) = max_records {
            sync_config = sync_config.with_max_records(max);
        }

        let tap = TapRestCountries::new().with_sync_config(sync_config);

        // Optional JSON-lines record file
        let mut output_file = output
            .map(|path| {
                fs::File::create(path)
                    .map_err(|e| Error::config(format!("Failed to create output file: {e}")))
            })
            .transpose()?;

        let mut record_count = 0usize;
        let mut stream = tap.read(&config).await?;
        while let Some(message) = stream.next().await {
            let message = message?;

            if let Message::Record { record, .. } = &message {
                record_count += 1;
                if let Some(file) = output_file.as_mut() {
                    serde_json::to_writer(&mut *file, record)?;
                    writeln!(file)?;
                }
            }

            self.output_message(&message_to_json(&message));
        }

        let duration_ms = sync_start.elapsed().as_millis() as u64;
        self.output_message(&json!({
            "type": "SYNC_SUMMARY",
            "summary": {
                "status": "SUCCEEDED",
                "connector": "tap-restcountries",
                "total_records": record_count,
                "total_streams": 1,
                "duration_ms": duration_ms,
                "output": {
                    "format": match self.cli.format {
                        OutputFormat::Json => "json",
                        OutputFormat::Pretty => "pretty",
                    },
                    "file": output.map(|p| p.to_string_lossy().to_string())
                }
            }
        }));

        Ok(())
    }

    /// List available streams (lightweight, no schemas)
    fn streams(&self) -> Result<()> {
        let tap = TapRestCountries::new();
        let stream_names: Vec<String> = tap
            .streams()
            .iter()
            .map(|s| s.name().to_string())
            .collect();

        self.output_message(&json!({
            "type": "STREAMS",
            "streams": stream_names,
            "connector": "tap-restcountries"
        }));

        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Convert an engine message to its wire representation
fn message_to_json(msg: &Message) -> Value {
    match msg {
        Message::Schema {
            stream,
            schema,
            key_properties,
        } => json!({
            "type": "SCHEMA",
            "schema": {
                "stream": stream,
                "schema": schema,
                "key_properties": key_properties
            }
        }),
        Message::Record {
            stream,
            record,
            emitted_at,
        } => json!({
            "type": "RECORD",
            "record": {
                "stream": stream,
                "data": record,
                "emitted_at": emitted_at.timestamp_millis()
            }
        }),
        Message::State { value } => json!({
            "type": "STATE",
            "state": value
        }),
        Message::Log { level, message } => json!({
            "type": "LOG",
            "log": {
                "level": level.as_str(),
                "message": message
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogLevel;
    use chrono::Utc;

    #[test]
    fn test_message_to_json_record() {
        let msg = Message::Record {
            stream: "countries".to_string(),
            record: json!({ "cca3": "NLD" }),
            emitted_at: Utc::now(),
        };

        let value = message_to_json(&msg);
        assert_eq!(value["type"], "RECORD");
        assert_eq!(value["record"]["stream"], "countries");
        assert_eq!(value["record"]["data"]["cca3"], "NLD");
        assert!(value["record"]["emitted_at"].is_i64());
    }

    #[test]
    fn test_message_to_json_schema() {
        let msg = Message::schema(
            "countries",
            json!({ "type": "object" }),
            vec!["cca3".to_string()],
        );

        let value = message_to_json(&msg);
        assert_eq!(value["type"], "SCHEMA");
        assert_eq!(value["schema"]["key_properties"], json!(["cca3"]));
    }

    #[test]
    fn test_message_to_json_log() {
        let msg = Message::log(LogLevel::Warn, "careful");
        let value = message_to_json(&msg);
        assert_eq!(value["type"], "LOG");
        assert_eq!(value["log"]["level"], "WARN");
        assert_eq!(value["log"]["message"], "careful");
    }

    #[test]
    fn test_message_to_json_state() {
        let msg = Message::state(json!({ "streams": {} }));
        let value = message_to_json(&msg);
        assert_eq!(value["type"], "STATE");
        assert_eq!(value["state"], json!({ "streams": {} }));
    }
}
