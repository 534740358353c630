//! Byte-identical output across repeated compilation and JSON round trips.

#[cfg(test)]
mod tests {
    use dynaexpr_core::expression::{AttributePath, CompareOp, Condition, OperationNode, UpdateNode};
    use dynaexpr_core::{ConditionBuilder, UpdateBuilder, compile};
    use dynaexpr_model::{Command, Item, ReturnValue};

    fn node() -> anyhow::Result<OperationNode> {
        let condition = ConditionBuilder::new()
            .expression("owner", "=", "alice")?
            .group(|g| {
                g.expression("size", ">", 10)?
                    .or_expression("tags", "contains", "big")
            })?;
        let update = UpdateBuilder::new()
            .set("owner", "bob")?
            .add("revision", 1)?
            .remove("lock")?;
        Ok(OperationNode {
            key: Item::from([("id".to_owned(), "f-1".into())]),
            condition: condition.build(),
            update: update.build(),
            return_values: Some(ReturnValue::AllNew),
            ..OperationNode::new("files")
        })
    }

    #[test]
    fn test_should_compile_identically_twice() -> anyhow::Result<()> {
        let node = node()?;
        let first = serde_json::to_string(&compile(&node))?;
        let second = serde_json::to_string(&compile(&node))?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_should_survive_ast_json_round_trip() -> anyhow::Result<()> {
        let node = node()?;
        let condition: Condition = serde_json::from_str(&serde_json::to_string(&node.condition)?)?;
        let update: UpdateNode = serde_json::from_str(&serde_json::to_string(&node.update)?)?;
        assert_eq!(condition, node.condition);
        assert_eq!(update, node.update);

        let rebuilt = OperationNode {
            condition,
            update,
            ..node.clone()
        };
        assert_eq!(compile(&rebuilt), compile(&node));
        Ok(())
    }

    #[test]
    fn test_should_keep_verbatim_names_through_json() -> anyhow::Result<()> {
        let condition = ConditionBuilder::new()
            .and(Condition::compare(
                AttributePath::new("a.b").index(1),
                CompareOp::Eq,
                7,
            ))
            .build();
        let json = serde_json::to_string(&condition)?;
        let back: Condition = serde_json::from_str(&json)?;
        assert_eq!(back, condition);

        let node = OperationNode {
            condition: back,
            ..OperationNode::new("t")
        };
        let command = compile(&node);
        assert_eq!(command.condition_expression.as_deref(), Some("#n0[1] = :v0"));
        assert_eq!(
            command
                .expression_attribute_names
                .as_ref()
                .and_then(|names| names.get("#n0"))
                .map(String::as_str),
            Some("a.b")
        );
        Ok(())
    }

    #[test]
    fn test_should_produce_expected_command_json() -> anyhow::Result<()> {
        let command: Command = compile(&node()?);
        let json = serde_json::to_string(&command)?;
        assert_eq!(
            json,
            concat!(
                r#"{"TableName":"files","#,
                r##""ConditionExpression":"#n0 = :v0 AND (#n1 > :v1 OR contains(#n2, :v2))","##,
                r##""UpdateExpression":"SET #n0 = :v3 REMOVE #n3 ADD #n4 :v4","##,
                r##""ExpressionAttributeNames":{"#n0":"owner","#n1":"size","#n2":"tags","#n3":"lock","#n4":"revision"},"##,
                r#""ExpressionAttributeValues":{":v0":{"S":"alice"},":v1":{"N":"10"},":v2":{"S":"big"},":v3":{"S":"bob"},":v4":{"N":"1"}},"#,
                r#""Key":{"id":{"S":"f-1"}},"#,
                r#""ReturnValues":"ALL_NEW"}"#
            )
        );
        Ok(())
    }
}
