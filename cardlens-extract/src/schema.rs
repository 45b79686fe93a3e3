//! Response schemas sent with every model request.
//!
//! The model is instructed to return JSON conforming to these shapes rather
//! than free text. Type names follow the Gemini REST schema convention.

use serde_json::{json, Value};

/// Schema for the field-extraction reply: the eleven summary fields, each a
/// string, plus the transactions array.
pub fn extraction_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "totalBalance": { "type": "STRING" },
            "dueDate": { "type": "STRING" },
            "statementDate": { "type": "STRING" },
            "last4Digits": { "type": "STRING" },
            "minPayment": { "type": "STRING" },
            "purchasesDebit": { "type": "STRING" },
            "paymentsCredits": { "type": "STRING" },
            "totalCreditLimit": { "type": "STRING" },
            "availableCreditLimit": { "type": "STRING" },
            "availableCashLimit": { "type": "STRING" },
            "previousStatementDues": { "type": "STRING" },
            "transactions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "date": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "amount": { "type": "STRING" }
                    }
                }
            }
        }
    })
}

/// Schema for the categorization reply: one label per description, in order.
pub fn categorization_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "categories": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_schema_names_every_summary_field() {
        let schema = extraction_schema();
        let props = schema["properties"].as_object().unwrap();
        for field in [
            "totalBalance",
            "dueDate",
            "statementDate",
            "last4Digits",
            "minPayment",
            "purchasesDebit",
            "paymentsCredits",
            "totalCreditLimit",
            "availableCreditLimit",
            "availableCashLimit",
            "previousStatementDues",
        ] {
            assert_eq!(props[field]["type"], "STRING", "missing field {field}");
        }
        assert_eq!(props["transactions"]["type"], "ARRAY");
        let txn = &props["transactions"]["items"]["properties"];
        assert_eq!(txn["date"]["type"], "STRING");
        assert_eq!(txn["description"]["type"], "STRING");
        assert_eq!(txn["amount"]["type"], "STRING");
    }

    #[test]
    fn test_categorization_schema_shape() {
        let schema = categorization_schema();
        assert_eq!(schema["properties"]["categories"]["type"], "ARRAY");
        assert_eq!(schema["properties"]["categories"]["items"]["type"], "STRING");
    }
}
