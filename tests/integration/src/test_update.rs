//! Update expressions compiled through `UpdateItem`.

#[cfg(test)]
mod tests {
    use dynaexpr_core::expression::{AttributePath, SetValue};
    use dynaexpr_core::{Conditional, ExpressionError, UpdateBuilder, UpdateItem};
    use dynaexpr_model::{AttributeValue, ReturnValue};
    use serde_json::json;

    use crate::{resolve, wire_json};

    fn base() -> UpdateItem {
        UpdateItem::new("counters").key("id", "page-1")
    }

    #[test]
    fn test_should_compile_set_and_remove_scenario() -> anyhow::Result<()> {
        let input = base().set_expression("count", "+", 1)?.remove("temp")?.build()?;
        let wire = wire_json(&input);
        assert_eq!(wire["UpdateExpression"], "SET #n0 = #n0 + :v0 REMOVE #n1");
        assert_eq!(
            wire["ExpressionAttributeNames"],
            json!({"#n0": "count", "#n1": "temp"})
        );
        assert_eq!(wire["ExpressionAttributeValues"], json!({":v0": {"N": "1"}}));
        assert_eq!(wire["Key"], json!({"id": {"S": "page-1"}}));
        Ok(())
    }

    #[test]
    fn test_should_emit_clauses_in_fixed_order() -> anyhow::Result<()> {
        // Added in reverse keyword order on purpose.
        let input = base()
            .delete("tags", AttributeValue::string_set(["old"]))?
            .add("visits", 1)?
            .remove("draft")?
            .set("title", "Home")?
            .set_expression("history", "list_append", vec![AttributeValue::from("v2")])?
            .set_expression("created", "if_not_exists", 1_700_000_000)?
            .build()?;
        let wire = wire_json(&input);
        let expr = input.update_expression.unwrap_or_default();
        assert_eq!(
            resolve(&expr, &wire),
            concat!(
                r#"SET title = {"S":"Home"}, history = list_append(history, {"L":[{"S":"v2"}]}), "#,
                r#"created = if_not_exists(created, {"N":"1700000000"}) "#,
                r#"REMOVE draft ADD visits {"N":"1"} DELETE tags {"SS":["old"]}"#
            )
        );
        Ok(())
    }

    #[test]
    fn test_should_omit_empty_clauses_and_expression() -> anyhow::Result<()> {
        let set_only = base().set("a", 1)?.build()?;
        assert_eq!(set_only.update_expression.as_deref(), Some("SET #n0 = :v0"));

        let empty = base().build()?;
        let wire = wire_json(&empty);
        assert!(wire.get("UpdateExpression").is_none());
        assert!(wire.get("ExpressionAttributeNames").is_none());
        assert!(wire.get("ExpressionAttributeValues").is_none());
        assert_eq!(wire["ReturnValues"], "NONE");
        Ok(())
    }

    #[test]
    fn test_should_share_aliases_between_condition_and_update() -> anyhow::Result<()> {
        let input = base()
            .condition_expression("version", "=", 3)?
            .set("version", 4)?
            .return_values(ReturnValue::UpdatedNew)
            .build()?;
        assert_eq!(input.condition_expression.as_deref(), Some("#n0 = :v0"));
        assert_eq!(input.update_expression.as_deref(), Some("SET #n0 = :v1"));
        assert_eq!(input.expression_attribute_names.len(), 1);
        assert_eq!(input.expression_attribute_values.len(), 2);
        assert_eq!(input.return_values, Some(ReturnValue::UpdatedNew));
        Ok(())
    }

    #[test]
    fn test_should_increment_from_another_path() -> anyhow::Result<()> {
        let input = base()
            .set_with(
                AttributePath::parse("stats.total")?,
                SetValue::Increment {
                    source: AttributePath::parse("stats.base")?,
                    amount: AttributeValue::number(5),
                },
            )?
            .build()?;
        assert_eq!(
            input.update_expression.as_deref(),
            Some("SET #n0.#n1 = #n0.#n2 + :v0")
        );
        Ok(())
    }

    #[test]
    fn test_should_reject_invalid_update_operands() {
        assert!(matches!(
            base().set_expression("count", "+", "one"),
            Err(ExpressionError::MalformedArgument { .. })
        ));
        assert!(matches!(
            base().set_expression("log", "list_append", 1),
            Err(ExpressionError::MalformedArgument { .. })
        ));
        assert!(matches!(
            base().add("name", "x"),
            Err(ExpressionError::MalformedArgument { .. })
        ));
        assert!(matches!(
            base().delete("count", 1),
            Err(ExpressionError::MalformedArgument { .. })
        ));
        assert!(matches!(
            base().set_expression("count", "*", 2),
            Err(ExpressionError::MalformedArgument { .. })
        ));
    }

    #[test]
    fn test_should_reject_path_targeted_twice() -> anyhow::Result<()> {
        let err = base().set("a", 1)?.remove("a").unwrap_err();
        assert_eq!(
            err,
            ExpressionError::ConflictingUpdateTarget {
                path: "a".to_owned(),
                existing: "SET",
            }
        );
        assert!(base().set("a", 1)?.set("a", 2).is_err());
        // Overlapping but distinct paths are accepted.
        assert!(base().set("a.b", 1)?.remove("a.c").is_ok());
        Ok(())
    }

    #[test]
    fn test_should_reuse_builder_templates() -> anyhow::Result<()> {
        let template = UpdateBuilder::new().set("status", "active")?;
        let with_touch = template.set("touched", true)?;
        let with_remove = template.remove("lock")?;

        let first = base().with_update(with_touch).build()?;
        let second = base().with_update(with_remove).build()?;
        let untouched = base().with_update(template).build()?;

        assert_eq!(
            first.update_expression.as_deref(),
            Some("SET #n0 = :v0, #n1 = :v1")
        );
        assert_eq!(
            second.update_expression.as_deref(),
            Some("SET #n0 = :v0 REMOVE #n1")
        );
        assert_eq!(untouched.update_expression.as_deref(), Some("SET #n0 = :v0"));
        Ok(())
    }
}
