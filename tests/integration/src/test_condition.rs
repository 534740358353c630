//! Condition expressions compiled through the write operations.

#[cfg(test)]
mod tests {
    use dynaexpr_core::expression::{AttributePath, AttributeType, Condition};
    use dynaexpr_core::{Argument, Conditional, DeleteItem, ExpressionError, PutItem};
    use dynaexpr_model::{AttributeValue, ReturnValue};
    use serde_json::json;

    use crate::{resolve, wire_json};

    #[test]
    fn test_should_compile_or_scenario_with_both_maps() -> anyhow::Result<()> {
        let input = DeleteItem::new("users")
            .key("pk", "u#1")
            .condition_expression("userId", "=", "abc")?
            .or_condition_expression("age", ">", 21)?
            .build()?;
        let wire = wire_json(&input);

        assert_eq!(wire["ConditionExpression"], "#n0 = :v0 OR #n1 > :v1");
        assert_eq!(
            wire["ExpressionAttributeNames"],
            json!({"#n0": "userId", "#n1": "age"})
        );
        assert_eq!(
            wire["ExpressionAttributeValues"],
            json!({":v0": {"S": "abc"}, ":v1": {"N": "21"}})
        );
        Ok(())
    }

    #[test]
    fn test_should_parenthesize_only_nested_groups() -> anyhow::Result<()> {
        let flat = PutItem::new("t")
            .attribute("id", 1)
            .condition_expression("a", "=", 1)?
            .condition_expression("b", "=", 2)?
            .or_condition_expression("c", "=", 3)?
            .build()?;
        let flat_expr = flat.condition_expression.unwrap_or_default();
        assert!(!flat_expr.contains('('));

        let nested = PutItem::new("t")
            .attribute("id", 1)
            .condition_expression("a", "=", 1)?
            .condition_group(|g| g.expression("b", "=", 2)?.or_expression("c", "=", 3))?
            .build()?;
        let nested_expr = nested.condition_expression.unwrap_or_default();
        assert_eq!(nested_expr, "#n0 = :v0 AND (#n1 = :v1 OR #n2 = :v2)");
        assert_eq!(nested_expr.matches('(').count(), 1);
        Ok(())
    }

    #[test]
    fn test_should_render_every_function_template() -> anyhow::Result<()> {
        let input = PutItem::new("docs")
            .attribute("id", "d1")
            .condition_attribute("id", "not_exists")?
            .or_condition_group(|g| {
                g.expression("title", "begins_with", "Draft")?
                    .expression("tags", "contains", "urgent")?
                    .expression("rank", "between", (1, 10))?
                    .expression("state", "in", vec!["new", "open"])?
                    .expression("meta", "attribute_type", "M")?
                    .expression("body", "size", Argument::nested("<=", 4096))
            })?
            .build()?;
        let wire = wire_json(&input);
        let expr = input.condition_expression.unwrap_or_default();
        assert_eq!(
            resolve(&expr, &wire),
            concat!(
                r#"attribute_not_exists(id) OR (begins_with(title, {"S":"Draft"}) AND "#,
                r#"contains(tags, {"S":"urgent"}) AND rank BETWEEN {"N":"1"} AND {"N":"10"} AND "#,
                r#"state IN ({"S":"new"}, {"S":"open"}) AND attribute_type(meta, {"S":"M"}) AND "#,
                r#"size(body) <= {"N":"4096"})"#
            )
        );
        Ok(())
    }

    #[test]
    fn test_should_negate_groups_and_leaves() -> anyhow::Result<()> {
        let path = AttributePath::parse("status")?;
        let group = dynaexpr_core::ConditionBuilder::new()
            .expression("a", "=", 1)?
            .or_expression("b", "=", 2)?
            .into_condition();
        let input = DeleteItem::new("t")
            .key("pk", "1")
            .condition(Condition::negate(Condition::exists(path)))
            .condition(Condition::negate(group))
            .build()?;
        assert_eq!(
            input.condition_expression.as_deref(),
            Some("NOT attribute_exists(#n0) AND NOT (#n1 = :v0 OR #n2 = :v1)")
        );
        Ok(())
    }

    #[test]
    fn test_should_reuse_name_aliases_for_nested_paths() -> anyhow::Result<()> {
        let input = PutItem::new("t")
            .attribute("id", 1)
            .condition_expression("info.rating", ">", 4)?
            .condition_expression("info.tags[0]", "=", "new")?
            .condition_expression("info.rating", "<", 9)?
            .build()?;
        assert_eq!(
            input.condition_expression.as_deref(),
            Some("#n0.#n1 > :v0 AND #n0.#n2[0] = :v1 AND #n0.#n1 < :v2")
        );
        assert_eq!(input.expression_attribute_names.len(), 3);
        assert_eq!(input.expression_attribute_values.len(), 3);
        Ok(())
    }

    #[test]
    fn test_should_reject_malformed_arguments_at_call_site() {
        let put = PutItem::new("t").attribute("id", 1);
        assert!(matches!(
            put.clone().condition_expression("a", "between", 1),
            Err(ExpressionError::MalformedArgument { .. })
        ));
        assert!(matches!(
            put.clone().condition_expression("a", "like", "x"),
            Err(ExpressionError::MalformedArgument { .. })
        ));
        assert!(matches!(
            put.clone().condition_expression("a", "in", Vec::<i32>::new()),
            Err(ExpressionError::MalformedArgument { .. })
        ));
        assert!(matches!(
            put.condition_expression("a[", "=", 1),
            Err(ExpressionError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_should_accept_typed_attribute_type_and_binary_values() -> anyhow::Result<()> {
        let blob = AttributeValue::from(bytes::Bytes::from_static(b"\x00\x01"));
        let input = PutItem::new("blobs")
            .attribute("id", blob.clone())
            .condition(Condition::attribute_type(
                AttributePath::new("payload"),
                AttributeType::B,
            ))
            .condition_expression("checksum", "<>", blob)?
            .return_values(ReturnValue::AllOld)
            .build()?;
        let wire = wire_json(&input);
        assert_eq!(
            wire["ConditionExpression"],
            "attribute_type(#n0, :v0) AND #n1 <> :v1"
        );
        assert_eq!(wire["ExpressionAttributeValues"][":v0"], json!({"S": "B"}));
        assert_eq!(wire["ExpressionAttributeValues"][":v1"], json!({"B": "AAE="}));
        assert_eq!(wire["Item"]["id"], json!({"B": "AAE="}));
        assert_eq!(wire["ReturnValues"], "ALL_OLD");
        Ok(())
    }
}
