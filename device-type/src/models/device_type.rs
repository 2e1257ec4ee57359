use serde::Serialize;
use serde_json::Value;

use crate::params::InvocationInput;

/// Class of every device type registered by this action.
pub const CLASS_ID: &str = "Device";

pub const REQUIRED_PARAMS: [&str; 4] = ["apiKey", "authToken", "orgId", "typeId"];

pub const OPTIONAL_PARAMS: [&str; 10] = [
    "id",
    "serialNumber",
    "manufacturer",
    "model",
    "deviceClass",
    "description",
    "fwVersion",
    "hwVersion",
    "descriptiveLocation",
    "metadata",
];

/// Body of `POST /device/types`.
///
/// Absent parameters are left out of the serialized body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceTypeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    class_id: &'static str,
    pub device_info: DeviceInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_class: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fw_version: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hw_version: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptive_location: Option<Value>,
}

impl DeviceTypeRequest {
    /// Copies the optional parameters verbatim.
    pub fn from_input(input: &InvocationInput) -> Self {
        let field = |name: &str| input.get(name).cloned();

        Self {
            id: field("id"),
            description: field("description"),
            class_id: CLASS_ID,
            device_info: DeviceInfo {
                serial_number: field("serialNumber"),
                manufacturer: field("manufacturer"),
                model: field("model"),
                device_class: field("deviceClass"),
                description: field("description"),
                fw_version: field("fwVersion"),
                hw_version: field("hwVersion"),
                descriptive_location: field("descriptiveLocation"),
            },
            metadata: field("metadata"),
        }
    }

    pub fn class_id(&self) -> &'static str {
        self.class_id
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn body_for(value: Value) -> Value {
        let Value::Object(input) = value else {
            panic!("test input must be an object");
        };
        serde_json::to_value(DeviceTypeRequest::from_input(&input)).unwrap()
    }

    #[test]
    fn full_body() {
        let body = body_for(json!({
            "apiKey": "a-1",
            "authToken": "secret",
            "orgId": "myorg",
            "typeId": "sensor",
            "id": "thermostat",
            "serialNumber": "SN-001",
            "manufacturer": "Acme",
            "model": "T1000",
            "deviceClass": "HVAC",
            "description": "Smart thermostat",
            "fwVersion": "1.0.3",
            "hwVersion": "rev2",
            "descriptiveLocation": "Building 4",
            "metadata": { "floor": 3, "tags": ["hvac"] },
        }));

        assert_eq!(
            body,
            json!({
                "id": "thermostat",
                "description": "Smart thermostat",
                "classId": "Device",
                "deviceInfo": {
                    "serialNumber": "SN-001",
                    "manufacturer": "Acme",
                    "model": "T1000",
                    "deviceClass": "HVAC",
                    "description": "Smart thermostat",
                    "fwVersion": "1.0.3",
                    "hwVersion": "rev2",
                    "descriptiveLocation": "Building 4",
                },
                "metadata": { "floor": 3, "tags": ["hvac"] },
            })
        );
    }

    #[test]
    fn absent_fields_are_omitted() {
        let body = body_for(json!({ "id": "thermostat", "model": "T1000" }));
        assert_eq!(
            body,
            json!({
                "id": "thermostat",
                "classId": "Device",
                "deviceInfo": { "model": "T1000" },
            })
        );
    }

    #[test]
    fn class_id_cannot_be_overridden() {
        let body = body_for(json!({ "classId": "Gateway", "deviceClass": "Gateway" }));
        assert_eq!(body["classId"], "Device");
        assert_eq!(body["deviceInfo"]["deviceClass"], "Gateway");

        let Value::Object(input) = json!({}) else { unreachable!() };
        assert_eq!(DeviceTypeRequest::from_input(&input).class_id(), CLASS_ID);
    }

    #[test]
    fn id_comes_only_from_the_id_param() {
        let body = body_for(json!({ "typeId": "sensor" }));
        assert_eq!(body, json!({ "classId": "Device", "deviceInfo": {} }));
        assert!(body.get("id").is_none());

        assert_eq!(
            body_for(json!({ "typeId": "sensor", "id": "other" }))["id"],
            "other"
        );
    }

    #[test]
    fn explicit_null_is_passed_through() {
        let body = body_for(json!({ "typeId": "sensor", "metadata": null }));
        assert_eq!(body.get("metadata"), Some(&Value::Null));
    }

    #[test]
    fn default_required_params_are_not_optional() {
        for name in REQUIRED_PARAMS {
            assert!(!OPTIONAL_PARAMS.contains(&name), "{name}");
        }
    }
}
