use super::tx_time;
use crate::context::submitting_client_identity;
use crate::dispatch::{Contract, args, json, parse_arg, unknown};
use crate::reactions::{self, Reactable, Vote};
use crate::records::{self, Owned};
use crate::{ContractResult, TransactionContext};
use plug_model::{Record, impl_record};
use plug_storage::Selector;
use plug_types::LedgerTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Topic {
    pub hash: String,
    pub title: String,
    pub creator: String,
    pub create_time: LedgerTime,
    pub update_time: LedgerTime,
    pub category: String,
    #[serde(deserialize_with = "plug_model::null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "plug_model::null_as_default")]
    pub upvotes: Vec<String>,
    #[serde(deserialize_with = "plug_model::null_as_default")]
    pub downvotes: Vec<String>,
    #[serde(deserialize_with = "plug_model::null_as_default")]
    pub emojis: BTreeMap<u8, Vec<String>>,
    pub muted: bool,
}

impl_record!(Topic {
    entity: "topic",
    identity: hash,
    fields: [
        title,
        creator,
        create_time,
        update_time,
        category,
        tags,
        upvotes,
        downvotes,
        emojis,
        muted,
    ],
});

impl Owned for Topic {
    fn creator(&self) -> &str {
        &self.creator
    }
}

impl Reactable for Topic {
    fn upvotes_mut(&mut self) -> &mut Vec<String> {
        &mut self.upvotes
    }

    fn downvotes_mut(&mut self) -> &mut Vec<String> {
        &mut self.downvotes
    }

    fn emojis_mut(&mut self) -> &mut BTreeMap<u8, Vec<String>> {
        &mut self.emojis
    }
}

/// Discussion topics, keyed by content hash. Topics cannot be deleted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopicContract;

impl TopicContract {
    /// Seeds three sample topics, overwriting any with the same hashes.
    pub fn init_ledger(&self, ctx: &dyn TransactionContext) -> ContractResult<Vec<Topic>> {
        let now = tx_time(ctx)?;
        let topics: Vec<Topic> = (1..=3)
            .map(|n: usize| Topic {
                hash: n.to_string(),
                title: format!("title{n}"),
                creator: format!("user{n}"),
                create_time: now,
                update_time: now,
                category: format!("category{n}"),
                tags: (1..=n + 1).map(|t| format!("tag{t}")).collect(),
                ..Topic::default()
            })
            .collect();
        for topic in &topics {
            records::store(ctx, topic)?;
        }
        records::emit(ctx, "InitLedger", &topics)?;
        Ok(topics)
    }

    /// Creates a topic owned by the caller. Timestamps are stamped from the
    /// transaction and votes or reactions in the payload are dropped.
    pub fn create_topic(&self, ctx: &dyn TransactionContext, payload: &str) -> ContractResult<Topic> {
        let mut topic: Topic = serde_json::from_str(payload)?;
        let caller = submitting_client_identity(ctx)?;
        let now = tx_time(ctx)?;
        topic.creator = caller.into_string();
        topic.create_time = now;
        topic.update_time = now;
        topic.upvotes.clear();
        topic.downvotes.clear();
        topic.emojis.clear();
        records::insert(ctx, &topic)?;
        records::emit(ctx, "CreateTopic", &topic)?;
        Ok(topic)
    }

    pub fn topic_exists(&self, ctx: &dyn TransactionContext, hash: &str) -> ContractResult<bool> {
        records::exists::<Topic>(ctx, hash)
    }

    pub fn read_topic(&self, ctx: &dyn TransactionContext, hash: &str) -> ContractResult<Topic> {
        records::read(ctx, hash)
    }

    /// Creator-only partial update. Same rules as posts: ownership,
    /// creation time, votes and reactions are kept.
    pub fn update_topic(&self, ctx: &dyn TransactionContext, payload: &str) -> ContractResult<Topic> {
        let mut next: Topic = serde_json::from_str(payload)?;
        records::require_identity(&next, "updating")?;
        let stored = records::owned_by_caller::<Topic>(ctx, &next.hash, "updated")?;

        next.creator.clear();
        next.create_time = LedgerTime::zero();
        next.upvotes.clear();
        next.downvotes.clear();
        next.emojis.clear();
        next.update_time = tx_time(ctx)?;

        let merged = Topic::merge(&stored, &next);
        records::store(ctx, &merged)?;
        records::emit(ctx, "UpdateTopic", &merged)?;
        Ok(merged)
    }

    pub fn get_all_topics(&self, ctx: &dyn TransactionContext) -> ContractResult<Vec<Topic>> {
        records::all(ctx)
    }

    pub fn query_topics_by_title(
        &self,
        ctx: &dyn TransactionContext,
        title: &str,
    ) -> ContractResult<Vec<Topic>> {
        records::query(ctx, &Selector::new().field_eq("title", title))
    }

    pub fn query_topics_by_creator(
        &self,
        ctx: &dyn TransactionContext,
        creator: &str,
    ) -> ContractResult<Vec<Topic>> {
        records::query(ctx, &Selector::new().field_eq("creator", creator))
    }

    pub fn query_topics_by_category(
        &self,
        ctx: &dyn TransactionContext,
        category: &str,
    ) -> ContractResult<Vec<Topic>> {
        records::query(ctx, &Selector::new().field_eq("category", category))
    }

    /// Topics whose `tags` contain `tag`.
    pub fn query_topics_by_tag(
        &self,
        ctx: &dyn TransactionContext,
        tag: &str,
    ) -> ContractResult<Vec<Topic>> {
        records::query(ctx, &Selector::new().elem_match_eq("tags", tag))
    }

    pub fn upvote_topic(&self, ctx: &dyn TransactionContext, hash: &str) -> ContractResult<Topic> {
        let topic = reactions::vote::<Topic>(ctx, hash, Vote::Up)?;
        records::emit(ctx, "UpvoteTopic", &topic)?;
        Ok(topic)
    }

    pub fn downvote_topic(&self, ctx: &dyn TransactionContext, hash: &str) -> ContractResult<Topic> {
        let topic = reactions::vote::<Topic>(ctx, hash, Vote::Down)?;
        records::emit(ctx, "DownvoteTopic", &topic)?;
        Ok(topic)
    }

    pub fn add_topic_emoji(
        &self,
        ctx: &dyn TransactionContext,
        hash: &str,
        code: u8,
    ) -> ContractResult<Topic> {
        let topic = reactions::react::<Topic>(ctx, hash, code, true)?;
        records::emit(ctx, "AddTopicEmoji", &topic)?;
        Ok(topic)
    }

    pub fn remove_topic_emoji(
        &self,
        ctx: &dyn TransactionContext,
        hash: &str,
        code: u8,
    ) -> ContractResult<Topic> {
        let topic = reactions::react::<Topic>(ctx, hash, code, false)?;
        records::emit(ctx, "RemoveTopicEmoji", &topic)?;
        Ok(topic)
    }
}

impl Contract for TopicContract {
    fn name(&self) -> &'static str {
        "TopicContract"
    }

    fn functions(&self) -> &'static [&'static str] {
        &[
            "InitLedger",
            "CreateTopic",
            "TopicExists",
            "ReadTopic",
            "UpdateTopic",
            "GetAllTopics",
            "QueryTopicsByTitle",
            "QueryTopicsByCreator",
            "QueryTopicsByCategory",
            "QueryTopicsByTag",
            "UpvoteTopic",
            "DownvoteTopic",
            "AddTopicEmoji",
            "RemoveTopicEmoji",
        ]
    }

    fn invoke(
        &self,
        ctx: &dyn TransactionContext,
        function: &str,
        arguments: &[String],
    ) -> ContractResult<Option<Value>> {
        match function {
            "InitLedger" => {
                args::<0>(function, arguments)?;
                self.init_ledger(ctx)?;
                Ok(None)
            }
            "CreateTopic" => {
                let [payload] = args(function, arguments)?;
                json(&self.create_topic(ctx, payload)?)
            }
            "TopicExists" => {
                let [hash] = args(function, arguments)?;
                json(&self.topic_exists(ctx, hash)?)
            }
            "ReadTopic" => {
                let [hash] = args(function, arguments)?;
                json(&self.read_topic(ctx, hash)?)
            }
            "UpdateTopic" => {
                let [payload] = args(function, arguments)?;
                json(&self.update_topic(ctx, payload)?)
            }
            "GetAllTopics" => {
                args::<0>(function, arguments)?;
                json(&self.get_all_topics(ctx)?)
            }
            "QueryTopicsByTitle" => {
                let [title] = args(function, arguments)?;
                json(&self.query_topics_by_title(ctx, title)?)
            }
            "QueryTopicsByCreator" => {
                let [creator] = args(function, arguments)?;
                json(&self.query_topics_by_creator(ctx, creator)?)
            }
            "QueryTopicsByCategory" => {
                let [category] = args(function, arguments)?;
                json(&self.query_topics_by_category(ctx, category)?)
            }
            "QueryTopicsByTag" => {
                let [tag] = args(function, arguments)?;
                json(&self.query_topics_by_tag(ctx, tag)?)
            }
            "UpvoteTopic" => {
                let [hash] = args(function, arguments)?;
                json(&self.upvote_topic(ctx, hash)?)
            }
            "DownvoteTopic" => {
                let [hash] = args(function, arguments)?;
                json(&self.downvote_topic(ctx, hash)?)
            }
            "AddTopicEmoji" => {
                let [hash, code] = args(function, arguments)?;
                let code = parse_arg(function, "emoji code", code)?;
                json(&self.add_topic_emoji(ctx, hash, code)?)
            }
            "RemoveTopicEmoji" => {
                let [hash, code] = args(function, arguments)?;
                let code = parse_arg(function, "emoji code", code)?;
                json(&self.remove_topic_emoji(ctx, hash, code)?)
            }
            _ => Err(unknown(self.name(), function)),
        }
    }
}
