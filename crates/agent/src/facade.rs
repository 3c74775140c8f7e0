//! The three lookup operations behind the tools, plus their text rendering.
//!
//! Operations return structured views; tools render them to the text the
//! orchestrator reads. `OrderNotFound` is the only domain failure raised here.

use ops_core::domain::order::CustomerOrder;
use ops_core::domain::product::{ProductId, UNKNOWN_PRODUCT_NAME};
use ops_core::domain::user::display_name;
use ops_core::envelope::{OrderInfo, OrderSummaryInfo};
use ops_core::errors::DomainError;
use ops_core::sentiment::{aggregate, SentimentSummary};

use crate::deps::ToolDeps;
use crate::error::ToolError;

/// Customer shown for orders whose owner was never loaded.
pub const UNKNOWN_CUSTOMER: &str = "Unknown";

pub const NO_MESSAGES_TEXT: &str = "No messages found for this order";

#[derive(Clone, Debug, PartialEq)]
pub struct ProductDetails {
    pub name: String,
    pub included_tonnage: Option<f64>,
}

impl ProductDetails {
    fn unknown() -> Self {
        Self { name: UNKNOWN_PRODUCT_NAME.to_string(), included_tonnage: None }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrderSentiment {
    pub order_code: String,
    pub summary: SentimentSummary,
}

async fn require_order(deps: &ToolDeps, order_code: &str) -> Result<CustomerOrder, ToolError> {
    deps.orders
        .find_by_code(order_code)
        .await?
        .ok_or_else(|| DomainError::OrderNotFound { code: order_code.to_string() }.into())
}

/// Resolves an order's product reference; absent or dangling references fall
/// back to `Unknown` with no tonnage.
pub async fn resolve_product(
    deps: &ToolDeps,
    product_id: Option<&ProductId>,
) -> Result<ProductDetails, ToolError> {
    let Some(product_id) = product_id else {
        return Ok(ProductDetails::unknown());
    };

    Ok(deps
        .products
        .find_by_id(product_id)
        .await?
        .map(|product| ProductDetails {
            name: product.name,
            included_tonnage: Some(product.included_tonnage_quantity),
        })
        .unwrap_or_else(ProductDetails::unknown))
}

fn customer_name(found: &CustomerOrder) -> String {
    found.username.as_deref().map(display_name).unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string())
}

pub async fn lookup_order(deps: &ToolDeps, order_code: &str) -> Result<OrderInfo, ToolError> {
    let found = require_order(deps, order_code).await?;
    let product = resolve_product(deps, found.order.waste_type_id.as_ref()).await?;

    Ok(OrderInfo {
        code: found.order.code.clone(),
        status: found.order.status.clone(),
        customer: customer_name(&found),
        product_name: product.name,
        included_tonnage: product.included_tonnage,
        access_details: found.order.access_details_or_marker().to_string(),
        start_date: found.order.start_date.clone(),
        end_date: found.order.end_date.clone(),
    })
}

pub async fn find_active_orders(
    deps: &ToolDeps,
    company_name: &str,
) -> Result<Vec<OrderSummaryInfo>, ToolError> {
    let orders = deps.orders.find_active_by_company(company_name).await?;

    let mut summaries = Vec::with_capacity(orders.len());
    for found in &orders {
        let product = resolve_product(deps, found.order.waste_type_id.as_ref()).await?;
        summaries.push(OrderSummaryInfo {
            code: found.order.code.clone(),
            status: found.order.status.clone(),
            customer: customer_name(found),
            access_details: found.order.access_details_or_marker().to_string(),
            product_name: product.name,
        });
    }
    Ok(summaries)
}

pub async fn order_sentiment(
    deps: &ToolDeps,
    order_code: &str,
) -> Result<OrderSentiment, ToolError> {
    let found = require_order(deps, order_code).await?;
    let messages = deps.messages.list_for_conversation(&found.order.conversation_id).await?;

    Ok(OrderSentiment { order_code: order_code.to_string(), summary: aggregate(&messages) })
}

fn tonnage_text(tonnage: Option<f64>) -> String {
    match tonnage {
        Some(value) => format!("{value:?}"),
        None => "None".to_string(),
    }
}

pub fn render_order(order: &OrderInfo) -> String {
    format!(
        "Order {}: status={}, customer={}, product={}, included_tonnage={}, \
         access_details={}, start_date={}, end_date={}",
        order.code,
        order.status,
        order.customer,
        order.product_name,
        tonnage_text(order.included_tonnage),
        order.access_details,
        order.start_date,
        order.end_date
    )
}

pub fn render_order_summaries(company_name: &str, summaries: &[OrderSummaryInfo]) -> String {
    if summaries.is_empty() {
        return format!("No active orders found for '{company_name}'");
    }

    summaries
        .iter()
        .map(|summary| {
            format!(
                "Order {}: status={}, customer={}, product={}, access_details={}",
                summary.code,
                summary.status,
                summary.customer,
                summary.product_name,
                summary.access_details
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_sentiment(sentiment: &OrderSentiment) -> String {
    match &sentiment.summary {
        SentimentSummary::NoMessages => NO_MESSAGES_TEXT.to_string(),
        SentimentSummary::Breakdown(breakdown) => format!(
            "Order {}: {} messages, overall={}, positive={}, neutral={}, negative={}, \
             flagged_negative_messages={}",
            sentiment.order_code,
            breakdown.total,
            breakdown.overall,
            breakdown.positive,
            breakdown.neutral,
            breakdown.negative,
            quoted_list(&breakdown.flagged)
        ),
    }
}

/// `['a', 'b']`: single-quoted items, switching to double quotes for an item
/// that contains `'` but no `"`.
fn quoted_list(items: &[String]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| {
            let escaped = item.replace('\\', "\\\\");
            if item.contains('\'') && !item.contains('"') {
                format!("\"{escaped}\"")
            } else {
                format!("'{}'", escaped.replace('\'', "\\'"))
            }
        })
        .collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use ops_core::envelope::SentimentInfo;
    use ops_core::errors::DomainError;
    use ops_core::sentiment::{SentimentLabel, SentimentSummary};

    use super::{
        find_active_orders, lookup_order, order_sentiment, render_order,
        quoted_list, render_order_summaries, render_sentiment,
    };
    use crate::error::ToolError;
    use crate::test_support::fixture_deps;

    #[tokio::test]
    async fn lookup_resolves_product_customer_and_access_details() {
        let deps = fixture_deps().await;
        let order = lookup_order(&deps, "ORD-5353").await.expect("order");

        assert_eq!(order.status, "Completed");
        assert_eq!(order.customer, "Omaha Builders");
        assert_eq!(order.product_name, "30 Yard Dumpster");
        assert_eq!(order.included_tonnage, Some(4.0));
        assert_eq!(order.access_details, "Front driveway");
        assert_eq!((order.start_date.as_str(), order.end_date.as_str()), ("2025-12-31", "2026-01-07"));
        assert_eq!(
            render_order(&order),
            "Order ORD-5353: status=Completed, customer=Omaha Builders, product=30 Yard Dumpster, \
             included_tonnage=4.0, access_details=Front driveway, start_date=2025-12-31, \
             end_date=2026-01-07"
        );
    }

    #[tokio::test]
    async fn missing_or_dangling_product_falls_back_to_unknown() {
        let deps = fixture_deps().await;

        let without_product = lookup_order(&deps, "ORD-2044").await.expect("order");
        assert_eq!(without_product.product_name, "Unknown");
        assert_eq!(without_product.included_tonnage, None);

        let dangling = lookup_order(&deps, "ORD-4040").await.expect("order");
        assert_eq!(dangling.product_name, "Unknown");
        assert_eq!(dangling.included_tonnage, None);
        assert_eq!(dangling.customer, "Unknown");
        assert_eq!(dangling.access_details, "None");
        assert!(render_order(&dangling).contains("included_tonnage=None"));
    }

    #[tokio::test]
    async fn unknown_code_is_a_domain_failure() {
        let deps = fixture_deps().await;
        let error = lookup_order(&deps, "ORD-0000").await.expect_err("not found");

        assert!(matches!(
            error,
            ToolError::Domain(DomainError::OrderNotFound { ref code }) if code == "ORD-0000"
        ));
        assert_eq!(error.to_string(), "No order found with code ORD-0000");
    }

    #[tokio::test]
    async fn active_search_normalizes_company_names() {
        let deps = fixture_deps().await;

        for query in ["Chase Construction", "chase construction", "Chase_Construction"] {
            let summaries = find_active_orders(&deps, query).await.expect("search");
            let codes: Vec<&str> = summaries.iter().map(|summary| summary.code.as_str()).collect();
            assert_eq!(codes, vec!["ORD-1592", "ORD-1688"], "{query}");
        }

        let summaries = find_active_orders(&deps, "Chase Construction").await.expect("search");
        assert_eq!(summaries[0].product_name, "20 Yard Dumpster");
        assert_eq!(summaries[0].access_details, "Gate code 4321");
        assert_eq!(summaries[1].access_details, "None");
    }

    #[tokio::test]
    async fn unmatched_company_renders_explicit_empty_result() {
        let deps = fixture_deps().await;
        let summaries = find_active_orders(&deps, "Nonexistent Co").await.expect("search");

        assert!(summaries.is_empty());
        assert_eq!(
            render_order_summaries("Nonexistent Co", &summaries),
            "No active orders found for 'Nonexistent Co'"
        );
    }

    #[tokio::test]
    async fn sentiment_breaks_the_three_way_tie_deterministically() {
        let deps = fixture_deps().await;
        let sentiment = order_sentiment(&deps, "ORD-9910").await.expect("sentiment");

        let SentimentSummary::Breakdown(ref breakdown) = sentiment.summary else {
            panic!("expected a breakdown");
        };
        assert_eq!(breakdown.total, 8);
        assert_eq!((breakdown.positive, breakdown.neutral, breakdown.negative), (2, 3, 3));
        assert_eq!(breakdown.overall, SentimentLabel::Neutral);
        assert_eq!(
            breakdown.flagged,
            vec![
                "The pickup was late again",
                "Still waiting on the replacement",
                "This is unacceptable service"
            ]
        );

        let info = SentimentInfo::from_breakdown(&sentiment.order_code, breakdown);
        assert_eq!(info.message_count, 8);
        assert_eq!(
            render_sentiment(&sentiment),
            "Order ORD-9910: 8 messages, overall=neutral, positive=2, neutral=3, negative=3, \
             flagged_negative_messages=['The pickup was late again', \
             'Still waiting on the replacement', 'This is unacceptable service']"
        );
    }

    #[test]
    fn flagged_messages_render_as_a_quoted_list() {
        assert_eq!(quoted_list(&[]), "[]");
        assert_eq!(
            quoted_list(&["Bin's blocking the alley".to_string(), "Say \"now\"".to_string()]),
            "[\"Bin's blocking the alley\", 'Say \"now\"']"
        );
        assert_eq!(quoted_list(&["it's \"bad\"".to_string()]), "['it\\'s \"bad\"']");
    }

    #[tokio::test]
    async fn order_without_messages_is_distinct_from_not_found() {
        let deps = fixture_deps().await;
        let sentiment = order_sentiment(&deps, "ORD-1592").await.expect("sentiment");

        assert_eq!(sentiment.summary, SentimentSummary::NoMessages);
        assert_eq!(render_sentiment(&sentiment), "No messages found for this order");

        let missing = order_sentiment(&deps, "ORD-0000").await.expect_err("not found");
        assert!(matches!(missing, ToolError::Domain(_)));
    }
}
