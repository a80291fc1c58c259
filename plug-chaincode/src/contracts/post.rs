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
pub struct Post {
    /// Content hash of the post body.
    pub hash: String,
    pub creator: String,
    pub create_time: LedgerTime,
    pub update_time: LedgerTime,
    /// Hash of the topic the post belongs to.
    pub belong_to: String,
    /// Hash of the post this one replies to, if any.
    pub reply_to: String,
    #[serde(deserialize_with = "plug_model::null_as_default")]
    pub images: Vec<String>,
    #[serde(deserialize_with = "plug_model::null_as_default")]
    pub upvotes: Vec<String>,
    #[serde(deserialize_with = "plug_model::null_as_default")]
    pub downvotes: Vec<String>,
    #[serde(deserialize_with = "plug_model::null_as_default")]
    pub emojis: BTreeMap<u8, Vec<String>>,
    pub muted: bool,
}

impl_record!(Post {
    entity: "post",
    identity: hash,
    fields: [
        creator,
        create_time,
        update_time,
        belong_to,
        reply_to,
        images,
        upvotes,
        downvotes,
        emojis,
        muted,
    ],
});

impl Owned for Post {
    fn creator(&self) -> &str {
        &self.creator
    }
}

impl Reactable for Post {
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

/// Posts, keyed by content hash. Only the creator may update or delete.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostContract;

impl PostContract {
    /// Seeds three sample posts, overwriting any with the same hashes.
    pub fn init_ledger(&self, ctx: &dyn TransactionContext) -> ContractResult<Vec<Post>> {
        let now = tx_time(ctx)?;
        let sample = |n: u32, images: &[&str]| Post {
            hash: n.to_string(),
            creator: format!("user{n}"),
            create_time: now,
            update_time: now,
            belong_to: n.to_string(),
            reply_to: n.to_string(),
            images: images.iter().map(|i| i.to_string()).collect(),
            ..Post::default()
        };
        let posts = vec![
            sample(1, &["1.jpg", "2.jpg"]),
            sample(2, &["3.jpg", "4.jpg"]),
            sample(3, &[]),
        ];
        for post in &posts {
            records::store(ctx, post)?;
        }
        records::emit(ctx, "InitLedger", &posts)?;
        Ok(posts)
    }

    /// Creates a post owned by the caller.
    ///
    /// `creator` and both timestamps are stamped here, and any votes or
    /// reactions in the payload are dropped.
    pub fn create_post(&self, ctx: &dyn TransactionContext, payload: &str) -> ContractResult<Post> {
        let mut post: Post = serde_json::from_str(payload)?;
        let caller = submitting_client_identity(ctx)?;
        let now = tx_time(ctx)?;
        post.creator = caller.into_string();
        post.create_time = now;
        post.update_time = now;
        post.upvotes.clear();
        post.downvotes.clear();
        post.emojis.clear();
        records::insert(ctx, &post)?;
        records::emit(ctx, "CreatePost", &post)?;
        Ok(post)
    }

    pub fn post_exists(&self, ctx: &dyn TransactionContext, hash: &str) -> ContractResult<bool> {
        records::exists::<Post>(ctx, hash)
    }

    pub fn read_post(&self, ctx: &dyn TransactionContext, hash: &str) -> ContractResult<Post> {
        records::read(ctx, hash)
    }

    /// Merges the payload onto the stored post and stamps `updateTime`.
    ///
    /// Ownership, creation time, votes and reactions cannot be changed
    /// through this path.
    pub fn update_post(&self, ctx: &dyn TransactionContext, payload: &str) -> ContractResult<Post> {
        let mut next: Post = serde_json::from_str(payload)?;
        records::require_identity(&next, "updating")?;
        let stored = records::owned_by_caller::<Post>(ctx, &next.hash, "updated")?;

        next.creator.clear();
        next.create_time = LedgerTime::zero();
        next.upvotes.clear();
        next.downvotes.clear();
        next.emojis.clear();
        next.update_time = tx_time(ctx)?;

        let merged = Post::merge(&stored, &next);
        records::store(ctx, &merged)?;
        records::emit(ctx, "UpdatePost", &merged)?;
        Ok(merged)
    }

    pub fn delete_post(&self, ctx: &dyn TransactionContext, hash: &str) -> ContractResult<()> {
        let stored = records::owned_by_caller::<Post>(ctx, hash, "deleted")?;
        records::remove::<Post>(ctx, hash)?;
        records::emit(ctx, "DeletePost", &stored)
    }

    pub fn get_all_posts(&self, ctx: &dyn TransactionContext) -> ContractResult<Vec<Post>> {
        records::all(ctx)
    }

    pub fn query_posts_by_creator(
        &self,
        ctx: &dyn TransactionContext,
        creator: &str,
    ) -> ContractResult<Vec<Post>> {
        records::query(ctx, &Selector::new().field_eq("creator", creator))
    }

    pub fn query_posts_by_belong_to(
        &self,
        ctx: &dyn TransactionContext,
        belong_to: &str,
    ) -> ContractResult<Vec<Post>> {
        records::query(ctx, &Selector::new().field_eq("belongTo", belong_to))
    }

    pub fn query_posts_by_reply_to(
        &self,
        ctx: &dyn TransactionContext,
        reply_to: &str,
    ) -> ContractResult<Vec<Post>> {
        records::query(ctx, &Selector::new().field_eq("replyTo", reply_to))
    }

    pub fn upvote_post(&self, ctx: &dyn TransactionContext, hash: &str) -> ContractResult<Post> {
        let post = reactions::vote::<Post>(ctx, hash, Vote::Up)?;
        records::emit(ctx, "UpvotePost", &post)?;
        Ok(post)
    }

    pub fn downvote_post(&self, ctx: &dyn TransactionContext, hash: &str) -> ContractResult<Post> {
        let post = reactions::vote::<Post>(ctx, hash, Vote::Down)?;
        records::emit(ctx, "DownvotePost", &post)?;
        Ok(post)
    }

    pub fn add_post_emoji(
        &self,
        ctx: &dyn TransactionContext,
        hash: &str,
        code: u8,
    ) -> ContractResult<Post> {
        let post = reactions::react::<Post>(ctx, hash, code, true)?;
        records::emit(ctx, "AddPostEmoji", &post)?;
        Ok(post)
    }

    pub fn remove_post_emoji(
        &self,
        ctx: &dyn TransactionContext,
        hash: &str,
        code: u8,
    ) -> ContractResult<Post> {
        let post = reactions::react::<Post>(ctx, hash, code, false)?;
        records::emit(ctx, "RemovePostEmoji", &post)?;
        Ok(post)
    }
}

impl Contract for PostContract {
    fn name(&self) -> &'static str {
        "PostContract"
    }

    fn functions(&self) -> &'static [&'static str] {
        &[
            "InitLedger",
            "CreatePost",
            "PostExists",
            "ReadPost",
            "UpdatePost",
            "DeletePost",
            "GetAllPosts",
            "QueryPostsByCreator",
            "QueryPostsByBelongTo",
            "QueryPostsByReplyTo",
            "UpvotePost",
            "DownvotePost",
            "AddPostEmoji",
            "RemovePostEmoji",
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
            "CreatePost" => {
                let [payload] = args(function, arguments)?;
                json(&self.create_post(ctx, payload)?)
            }
            "PostExists" => {
                let [hash] = args(function, arguments)?;
                json(&self.post_exists(ctx, hash)?)
            }
            "ReadPost" => {
                let [hash] = args(function, arguments)?;
                json(&self.read_post(ctx, hash)?)
            }
            "UpdatePost" => {
                let [payload] = args(function, arguments)?;
                json(&self.update_post(ctx, payload)?)
            }
            "DeletePost" => {
                let [hash] = args(function, arguments)?;
                self.delete_post(ctx, hash)?;
                Ok(None)
            }
            "GetAllPosts" => {
                args::<0>(function, arguments)?;
                json(&self.get_all_posts(ctx)?)
            }
            "QueryPostsByCreator" => {
                let [creator] = args(function, arguments)?;
                json(&self.query_posts_by_creator(ctx, creator)?)
            }
            "QueryPostsByBelongTo" => {
                let [belong_to] = args(function, arguments)?;
                json(&self.query_posts_by_belong_to(ctx, belong_to)?)
            }
            "QueryPostsByReplyTo" => {
                let [reply_to] = args(function, arguments)?;
                json(&self.query_posts_by_reply_to(ctx, reply_to)?)
            }
            "UpvotePost" => {
                let [hash] = args(function, arguments)?;
                json(&self.upvote_post(ctx, hash)?)
            }
            "DownvotePost" => {
                let [hash] = args(function, arguments)?;
                json(&self.downvote_post(ctx, hash)?)
            }
            "AddPostEmoji" => {
                let [hash, code] = args(function, arguments)?;
                let code = parse_arg(function, "emoji code", code)?;
                json(&self.add_post_emoji(ctx, hash, code)?)
            }
            "RemovePostEmoji" => {
                let [hash, code] = args(function, arguments)?;
                let code = parse_arg(function, "emoji code", code)?;
                json(&self.remove_post_emoji(ctx, hash, code)?)
            }
            _ => Err(unknown(self.name(), function)),
        }
    }
}
