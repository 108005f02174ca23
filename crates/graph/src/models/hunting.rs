use m365sec_core::backed_model;

backed_model! {
    /// Body of `runHuntingQuery`: a KQL query and an optional ISO 8601 timespan.
    pub struct RunHuntingQueryPostRequestBody {
        "query" => query, set_query: String,
        "timespan" => timespan, set_timespan: String,
    }
}

backed_model! {
    /// Name and type of one result column.
    pub struct SinglePropertySchema {
        "name" => name, set_name: String,
        "type" => property_type, set_property_type: String,
    }
}

backed_model! {
    /// One result row. Columns vary by query, so they live in `additional_data`.
    pub struct HuntingRowResult {}
}

backed_model! {
    pub struct HuntingQueryResults ["#microsoft.graph.security.huntingQueryResults"] {
        "results" => results, set_results: Vec<HuntingRowResult>,
        "schema" => schema, set_schema: Vec<SinglePropertySchema>,
    }
}

impl RunHuntingQueryPostRequestBody {
    pub fn with_query(query: impl Into<String>) -> Self {
        let mut body = Self::new();
        body.set_query(Some(query.into()));
        body
    }
}

impl HuntingQueryResults {
    /// Column names in schema order.
    pub fn column_names(&self) -> Vec<String> {
        self.schema()
            .unwrap_or_default()
            .iter()
            .filter_map(SinglePropertySchema::name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use m365sec_core::Parsable;
    use serde_json::json;

    #[test]
    fn rows_expose_columns_as_additional_data() {
        let results = HuntingQueryResults::create_from_discriminator_value(json!({
            "schema": [
                {"name": "Timestamp", "type": "DateTime"},
                {"name": "FileName", "type": "String"}
            ],
            "results": [
                {"Timestamp": "2022-08-30T06:38:35.7664356Z", "FileName": "conhost.exe"}
            ]
        }))
        .unwrap();
        assert_eq!(results.column_names(), vec!["Timestamp", "FileName"]);
        let rows = results.results().unwrap();
        assert_eq!(rows[0].additional_data()["FileName"], "conhost.exe");
        assert_eq!(
            results.schema().unwrap()[0].property_type().as_deref(),
            Some("DateTime")
        );
    }

    #[test]
    fn query_body() {
        let mut body = RunHuntingQueryPostRequestBody::with_query("DeviceProcessEvents | limit 2");
        body.set_timespan(Some("P90D".into()));
        assert_eq!(
            body.serialize_content().unwrap(),
            json!({"query": "DeviceProcessEvents | limit 2", "timespan": "P90D"})
        );
    }
}
