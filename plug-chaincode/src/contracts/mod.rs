//! The six contracts, grouped by the chaincode that deploys them.
//!
//! | chaincode     | contracts |
//! |---------------|-----------|
//! | `plug`        | [`TagContract`], [`CategoryContract`], [`CategoryGroupContract`] |
//! | `post`        | [`PostContract`] |
//! | `topic`       | [`TopicContract`] |
//! | `userprofile` | [`UserProfileContract`] |

mod category;
mod category_group;
mod post;
mod tag;
mod topic;
mod user_profile;

pub use category::{Category, CategoryContract};
pub use category_group::{CategoryGroup, CategoryGroupContract};
pub use post::{Post, PostContract};
pub use tag::{Tag, TagContract};
pub use topic::{Topic, TopicContract};
pub use user_profile::{Profile, UserProfileContract};

use crate::{ContractResult, TransactionContext};
use plug_types::LedgerTime;

pub(crate) fn tx_time(ctx: &dyn TransactionContext) -> ContractResult<LedgerTime> {
    ctx.stub()
        .tx_timestamp()
        .map_err(crate::ContractError::State)
}
