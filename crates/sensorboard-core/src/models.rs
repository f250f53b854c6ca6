//! Row records returned by the remote API

use crate::resource::Resource;
use serde::{Deserialize, Deserializer, Serialize};

/// A record that belongs to a remote resource
pub trait Record {
    const RESOURCE: Resource;

    /// Value of the resource's identifier field
    fn id(&self) -> &str;

    /// Creation timestamp as sent by the API
    fn created_at(&self) -> &str;
}

/// One temperature/humidity reading from a DHT sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub dht_sensor_id: String,
    pub dht_sensor_temperature: f64,
    pub dht_sensor_humidity: f64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub income_id: String,
    pub income_name: String,
    #[serde(deserialize_with = "nominal")]
    pub income_nominal: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub expense_id: String,
    pub expense_name: String,
    #[serde(deserialize_with = "nominal")]
    pub expense_nominal: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub report_id: String,
    pub report_name: String,
    pub report_income: f64,
    pub report_expense: f64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Record for SensorReading {
    const RESOURCE: Resource = Resource::Sensors;

    fn id(&self) -> &str {
        &self.dht_sensor_id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }
}

impl Record for Income {
    const RESOURCE: Resource = Resource::Income;

    fn id(&self) -> &str {
        &self.income_id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }
}

impl Record for Expense {
    const RESOURCE: Resource = Resource::Expense;

    fn id(&self) -> &str {
        &self.expense_id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }
}

impl Record for Report {
    const RESOURCE: Resource = Resource::Reports;

    fn id(&self) -> &str {
        &self.report_id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }
}

/// Payload for creating or updating an income/expense entry
///
/// Field names depend on the resource, so the payload is built as a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryPayload {
    pub id: Option<String>,
    pub name: String,
    pub nominal: String,
}

impl EntryPayload {
    pub fn to_json(&self, resource: Resource) -> serde_json::Value {
        let (name_field, nominal_field) = match resource {
            Resource::Income => ("incomeName", "incomeNominal"),
            Resource::Expense => ("expenseName", "expenseNominal"),
            Resource::Sensors | Resource::Reports => ("name", "nominal"),
        };

        let mut object = serde_json::Map::new();
        if let Some(id) = &self.id {
            object.insert(resource.id_field().to_string(), id.clone().into());
        }
        object.insert(name_field.to_string(), self.name.clone().into());
        object.insert(nominal_field.to_string(), self.nominal.clone().into());
        serde_json::Value::Object(object)
    }
}

/// Temperature sample used by the dashboard chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureSample {
    pub dht_sensor_temperature: f64,
    #[serde(default)]
    pub created_at: String,
}

/// Humidity sample used by the dashboard chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumiditySample {
    pub dht_sensor_humidity: f64,
    #[serde(default)]
    pub created_at: String,
}

/// Accept nominal values sent either as strings or as numbers
fn nominal<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "invalid nominal value: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sensor_reading_from_api() {
        let reading: SensorReading = serde_json::from_value(json!({
            "dhtSensorId": "abc",
            "dhtSensorTemperature": 24.5,
            "dhtSensorHumidity": 60,
            "createdAt": "2024-01-01T10:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(reading.id(), "abc");
        assert_eq!(reading.dht_sensor_humidity, 60.0);
        assert_eq!(reading.updated_at, None);
    }

    #[test]
    fn test_nominal_accepts_numbers() {
        let expense: Expense = serde_json::from_value(json!({
            "expenseId": "1",
            "expenseName": "Listrik",
            "expenseNominal": 150000,
            "createdAt": "2024-01-01T10:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(expense.expense_nominal, "150000");

        let income: Income = serde_json::from_value(json!({
            "incomeId": "2",
            "incomeName": "Panen",
            "incomeNominal": "75000"
        }))
        .unwrap();
        assert_eq!(income.income_nominal, "75000");
        assert_eq!(income.created_at(), "");
    }

    #[test]
    fn test_expense_payload_fields() {
        let payload = EntryPayload {
            id: None,
            name: "Pupuk".to_string(),
            nominal: "20000".to_string(),
        };
        assert_eq!(
            payload.to_json(Resource::Expense),
            json!({ "expenseName": "Pupuk", "expenseNominal": "20000" })
        );
    }

    #[test]
    fn test_update_payload_carries_id() {
        let payload = EntryPayload {
            id: Some("9".to_string()),
            name: "Gaji".to_string(),
            nominal: "1000".to_string(),
        };
        assert_eq!(
            payload.to_json(Resource::Income),
            json!({ "incomeId": "9", "incomeName": "Gaji", "incomeNominal": "1000" })
        );
    }
}
