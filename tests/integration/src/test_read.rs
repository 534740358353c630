//! Read operations: `GetItem`, `Query` and `Scan`.

#[cfg(test)]
mod tests {
    use dynaexpr_core::{ExpressionError, Filtered, GetItem, Query, Scan};
    use dynaexpr_model::{Item, Select};
    use serde_json::json;

    use crate::wire_json;

    #[test]
    fn test_should_compile_get_item_projection() -> anyhow::Result<()> {
        let input = GetItem::new("users")
            .key("id", "u1")
            .projection(&["name", "address.city", "orders[0]"])?
            .build()?;
        assert_eq!(
            wire_json(&input),
            json!({
                "TableName": "users",
                "Key": {"id": {"S": "u1"}},
                "ProjectionExpression": "#n0, #n1.#n2, #n3[0]",
                "ExpressionAttributeNames": {
                    "#n0": "name",
                    "#n1": "address",
                    "#n2": "city",
                    "#n3": "orders"
                }
            })
        );
        Ok(())
    }

    #[test]
    fn test_should_compile_paginated_query() -> anyhow::Result<()> {
        let start = Item::from([
            ("pk".to_owned(), "user#1".into()),
            ("sk".to_owned(), "2024-03-01".into()),
        ]);
        let input = Query::new("events")
            .index_name("by-day")
            .key_condition("pk", "=", "user#1")?
            .key_condition("sk", ">", "2024-01-01")?
            .filter_expression("kind", "in", vec!["click", "view"])?
            .or_filter_expression("pinned", "=", true)?
            .exclusive_start_key(start)
            .scan_index_forward(false)
            .limit(50)
            .build()?;
        let wire = wire_json(&input);
        assert_eq!(wire["KeyConditionExpression"], "#n0 = :v0 AND #n1 > :v1");
        assert_eq!(wire["FilterExpression"], "#n2 IN (:v2, :v3) OR #n3 = :v4");
        assert_eq!(wire["ExpressionAttributeValues"][":v4"], json!({"BOOL": true}));
        assert_eq!(wire["ExclusiveStartKey"]["sk"], json!({"S": "2024-03-01"}));
        assert_eq!(wire["ScanIndexForward"], false);
        assert_eq!(wire["IndexName"], "by-day");
        Ok(())
    }

    #[test]
    fn test_should_reject_query_without_key_condition() {
        assert_eq!(
            Query::new("events").build(),
            Err(ExpressionError::MissingKeyCondition)
        );
        assert!(Query::new("events").key_condition("pk", "<>", "x").is_err());
    }

    #[test]
    fn test_should_compile_parallel_scan() -> anyhow::Result<()> {
        let input = Scan::new("products")
            .filter_group(|g| g.expression("stock", "<", 5)?.or_attribute("stock", "not_exists"))?
            .filter_expression("active", "=", true)?
            .projection(&["sku", "stock"])?
            .segment(2, 8)?
            .select(Select::SpecificAttributes)
            .build();
        let wire = wire_json(&input);
        assert_eq!(
            wire["FilterExpression"],
            "(#n0 < :v0 OR attribute_not_exists(#n0)) AND #n1 = :v1"
        );
        assert_eq!(wire["ProjectionExpression"], "#n2, #n0");
        assert_eq!(wire["Segment"], 2);
        assert_eq!(wire["TotalSegments"], 8);
        assert_eq!(wire["Select"], "SPECIFIC_ATTRIBUTES");
        Ok(())
    }
}
