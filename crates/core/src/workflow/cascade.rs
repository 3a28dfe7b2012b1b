//! Approval cascade planning.
//!
//! On approval, a plan's marketing items become a campaign draft and its
//! store-linked items become in-store execution tasks. The planner is pure:
//! it receives the loaded aggregate and returns the rows to insert; the
//! repository materializes them inside the approval transaction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Asset type taxonomy. A closed set: classification is a lookup, not a
/// heuristic, so an unrecognized type never silently becomes marketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// In-store or online banner.
    Banner,
    /// Video creative.
    Video,
    /// Social post.
    Post,
    /// Printed material.
    Print,
    /// Shelf display hardware.
    Display,
    /// Product sampling stock.
    Sampling,
}

impl AssetKind {
    /// Parse an asset kind from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "banner" => Some(Self::Banner),
            "video" => Some(Self::Video),
            "post" => Some(Self::Post),
            "print" => Some(Self::Print),
            "display" => Some(Self::Display),
            "sampling" => Some(Self::Sampling),
            _ => None,
        }
    }

    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Banner => "banner",
            Self::Video => "video",
            Self::Post => "post",
            Self::Print => "print",
            Self::Display => "display",
            Self::Sampling => "sampling",
        }
    }

    /// Whether an item carrying this asset belongs in a campaign.
    #[must_use]
    pub const fn is_marketing(&self) -> bool {
        matches!(self, Self::Banner | Self::Video | Self::Post | Self::Print)
    }
}

/// The slice of a plan item the cascade planner needs.
#[derive(Debug, Clone)]
pub struct CascadeItem {
    /// The plan item id.
    pub item_id: Uuid,
    /// Item name, reused for campaign items and tasks.
    pub name: String,
    /// Kind of the linked asset, if the item has one.
    pub asset_kind: Option<AssetKind>,
    /// Item activity end date, if set.
    pub end_date: Option<NaiveDate>,
    /// Stores the item is linked to.
    pub store_ids: Vec<Uuid>,
}

/// The checklist every materialized in-store task starts with.
pub const TASK_CHECKLIST: &str =
    "confirm stock; install asset; photograph placement; report completion";

/// A campaign item to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignItemDraft {
    /// The plan item this campaign item traces back to.
    pub jbp_item_id: Uuid,
    /// Item title, taken from the plan item name.
    pub title: String,
    /// Provenance note naming the source item and plan.
    pub notes: String,
}

/// A campaign to create, with its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignDraft {
    /// Campaign name, derived from the plan title.
    pub name: String,
    /// One entry per marketing item.
    pub items: Vec<CampaignItemDraft>,
}

/// An in-store task to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    /// The plan item the task executes.
    pub jbp_item_id: Uuid,
    /// The store the task runs in.
    pub store_id: Uuid,
    /// Task name.
    pub name: String,
    /// Steps the field team works through, starting from [`TASK_CHECKLIST`].
    pub checklist: String,
    /// Item end date, falling back to the plan end date.
    pub deadline: NaiveDate,
}

/// An execution plan to create, with its tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionPlanDraft {
    /// Plan name, derived from the plan title.
    pub name: String,
    /// One entry per (item, store) pair.
    pub tasks: Vec<TaskDraft>,
}

/// Everything the approval transaction has to materialize.
///
/// At most one campaign and at most one execution plan are ever produced
/// for a single approval, so re-approval cannot duplicate them even before
/// the `AlreadyApproved` guard is reached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadePlan {
    /// Campaign to create, if any item is a marketing item.
    pub campaign: Option<CampaignDraft>,
    /// Execution plan to create, if any item is linked to stores.
    pub execution: Option<ExecutionPlanDraft>,
}

impl CascadePlan {
    /// Returns true if the approval materializes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.campaign.is_none() && self.execution.is_none()
    }
}

/// Builds the cascade plan for an approval.
///
/// Marketing items (by asset kind) become campaign items with a provenance
/// note naming the source item and the plan; items with store links become
/// one task per store, with the item end date as the deadline and the plan
/// end date as the fallback.
#[must_use]
pub fn build_cascade(
    jbp_id: Uuid,
    jbp_title: &str,
    jbp_end: NaiveDate,
    items: &[CascadeItem],
) -> CascadePlan {
    let campaign_items: Vec<CampaignItemDraft> = items
        .iter()
        .filter(|item| item.asset_kind.is_some_and(|k| k.is_marketing()))
        .map(|item| CampaignItemDraft {
            jbp_item_id: item.item_id,
            title: item.name.clone(),
            notes: format!(
                "Materialized on approval of JBP {jbp_id} from plan item {} ({})",
                item.item_id, item.name
            ),
        })
        .collect();

    let tasks: Vec<TaskDraft> = items
        .iter()
        .flat_map(|item| {
            let deadline = item.end_date.unwrap_or(jbp_end);
            item.store_ids.iter().map(move |&store_id| TaskDraft {
                jbp_item_id: item.item_id,
                store_id,
                name: item.name.clone(),
                checklist: TASK_CHECKLIST.to_string(),
                deadline,
            })
        })
        .collect();

    CascadePlan {
        campaign: (!campaign_items.is_empty()).then(|| CampaignDraft {
            name: format!("{jbp_title} campaign"),
            items: campaign_items,
        }),
        execution: (!tasks.is_empty()).then(|| ExecutionPlanDraft {
            name: format!("{jbp_title} execution"),
            tasks,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(kind: Option<AssetKind>, end: Option<NaiveDate>, stores: usize) -> CascadeItem {
        CascadeItem {
            item_id: Uuid::new_v4(),
            name: "endcap push".to_string(),
            asset_kind: kind,
            end_date: end,
            store_ids: (0..stores).map(|_| Uuid::new_v4()).collect(),
        }
    }

    #[test]
    fn test_marketing_classification_is_closed() {
        assert!(AssetKind::Banner.is_marketing());
        assert!(AssetKind::Video.is_marketing());
        assert!(AssetKind::Post.is_marketing());
        assert!(AssetKind::Print.is_marketing());
        assert!(!AssetKind::Display.is_marketing());
        assert!(!AssetKind::Sampling.is_marketing());
        assert_eq!(AssetKind::parse("hologram"), None);
    }

    #[test]
    fn test_no_marketing_items_means_no_campaign() {
        let items = vec![item(Some(AssetKind::Display), None, 0), item(None, None, 0)];
        let plan = build_cascade(Uuid::new_v4(), "Q3 plan", date(2026, 9, 30), &items);
        assert!(plan.campaign.is_none());
        assert!(plan.execution.is_none());
        assert!(plan.is_empty());
    }

    #[test]
    fn test_one_campaign_item_per_marketing_item() {
        let items = vec![
            item(Some(AssetKind::Banner), None, 0),
            item(Some(AssetKind::Video), None, 0),
            item(Some(AssetKind::Sampling), None, 0),
        ];
        let plan = build_cascade(Uuid::new_v4(), "Q3 plan", date(2026, 9, 30), &items);
        let campaign = plan.campaign.unwrap();
        assert_eq!(campaign.items.len(), 2);
        assert_eq!(campaign.items[0].jbp_item_id, items[0].item_id);
        assert_eq!(campaign.items[1].jbp_item_id, items[1].item_id);
    }

    #[test]
    fn test_campaign_item_notes_name_source_item_and_plan() {
        let jbp_id = Uuid::new_v4();
        let items = vec![item(Some(AssetKind::Banner), None, 0)];
        let plan = build_cascade(jbp_id, "Q3 plan", date(2026, 9, 30), &items);
        let campaign_item = &plan.campaign.unwrap().items[0];
        assert_eq!(campaign_item.title, "endcap push");
        assert!(campaign_item.notes.contains(&jbp_id.to_string()));
        assert!(campaign_item.notes.contains(&items[0].item_id.to_string()));
    }

    #[test]
    fn test_one_task_per_item_store_pair() {
        let items = vec![
            item(Some(AssetKind::Banner), None, 3),
            item(None, None, 2),
            item(Some(AssetKind::Print), None, 0),
        ];
        let plan = build_cascade(Uuid::new_v4(), "Q3 plan", date(2026, 9, 30), &items);
        let execution = plan.execution.unwrap();
        assert_eq!(execution.tasks.len(), 5);
        assert!(execution.tasks.iter().all(|t| t.checklist == TASK_CHECKLIST));
    }

    #[test]
    fn test_task_deadline_prefers_item_end_date() {
        let item_end = date(2026, 8, 15);
        let jbp_end = date(2026, 12, 31);
        let items = vec![item(None, Some(item_end), 1), item(None, None, 1)];
        let plan = build_cascade(Uuid::new_v4(), "Q3 plan", jbp_end, &items);
        let execution = plan.execution.unwrap();
        assert_eq!(execution.tasks[0].deadline, item_end);
        assert_eq!(execution.tasks[1].deadline, jbp_end);
    }

    #[test]
    fn test_at_most_one_campaign_and_one_execution_plan() {
        let items = vec![
            item(Some(AssetKind::Banner), None, 2),
            item(Some(AssetKind::Post), None, 2),
        ];
        let plan = build_cascade(Uuid::new_v4(), "Q3 plan", date(2026, 9, 30), &items);
        // Singular fields by construction: one campaign, one plan.
        assert!(plan.campaign.is_some());
        assert!(plan.execution.is_some());
        assert_eq!(plan.campaign.unwrap().items.len(), 2);
        assert_eq!(plan.execution.unwrap().tasks.len(), 4);
    }
}
