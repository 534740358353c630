//! Builders and nodes shared across threads as templates.

#[cfg(test)]
mod tests {
    use std::thread;

    use dynaexpr_core::expression::{Condition, OperationNode, UpdateNode};
    use dynaexpr_core::{
        Conditional, ConditionBuilder, DeleteItem, GetItem, PutItem, Query, Scan, UpdateBuilder,
        UpdateItem,
    };

    fn assert_send_sync_clone<T: Send + Sync + Clone>() {}

    #[test]
    fn test_should_be_send_sync_and_clone() {
        assert_send_sync_clone::<ConditionBuilder>();
        assert_send_sync_clone::<UpdateBuilder>();
        assert_send_sync_clone::<Condition>();
        assert_send_sync_clone::<UpdateNode>();
        assert_send_sync_clone::<OperationNode>();
        assert_send_sync_clone::<PutItem>();
        assert_send_sync_clone::<UpdateItem>();
        assert_send_sync_clone::<DeleteItem>();
        assert_send_sync_clone::<GetItem>();
        assert_send_sync_clone::<Query>();
        assert_send_sync_clone::<Scan>();
    }

    #[test]
    fn test_should_compile_shared_template_from_threads() -> anyhow::Result<()> {
        let template = UpdateItem::new("counters")
            .key("id", "page-1")
            .condition_attribute("id", "exists")?
            .set_expression("hits", "+", 1)?;

        let (first, second) = thread::scope(|s| {
            let a = s.spawn(|| template.build());
            let b = s.spawn(|| template.build());
            (a.join(), b.join())
        });
        let first = first.map_err(|_| anyhow::anyhow!("first thread panicked"))??;
        let second = second.map_err(|_| anyhow::anyhow!("second thread panicked"))??;

        assert_eq!(first, second);
        assert_eq!(
            first.condition_expression.as_deref(),
            Some("attribute_exists(#n0)")
        );
        assert_eq!(first.update_expression.as_deref(), Some("SET #n1 = #n1 + :v0"));
        Ok(())
    }

    #[test]
    fn test_should_extend_shared_builder_independently() -> anyhow::Result<()> {
        let base = ConditionBuilder::new().expression("status", "=", "open")?;

        let (narrow, wide) = thread::scope(|s| {
            let narrow = s.spawn(|| base.expression("priority", ">", 3));
            let wide = s.spawn(|| base.or_expression("owner", "=", "ops"));
            (narrow.join(), wide.join())
        });
        let narrow = narrow.map_err(|_| anyhow::anyhow!("thread panicked"))??;
        let wide = wide.map_err(|_| anyhow::anyhow!("thread panicked"))??;

        let compile = |builder: ConditionBuilder| -> anyhow::Result<Option<String>> {
            Ok(PutItem::new("tickets")
                .attribute("id", 1)
                .with_conditions(builder)
                .build()?
                .condition_expression)
        };
        assert_eq!(compile(narrow)?.as_deref(), Some("#n0 = :v0 AND #n1 > :v1"));
        assert_eq!(compile(wide)?.as_deref(), Some("#n0 = :v0 OR #n1 = :v1"));
        assert_eq!(compile(base)?.as_deref(), Some("#n0 = :v0"));
        Ok(())
    }
}
