use std::collections::HashMap;

use serde_json::Value;

use super::model::{CommentAuthor, CommentItem};
use crate::core::{
    json_path,
    wire::{parse_count, text_of},
};

/* --------- Where things live in a `next` response --------- */

// Per `onResponseReceivedEndpoints` entry.
const ENDPOINT_ITEMS: &[&str] = &[
    "appendContinuationItemsAction.continuationItems",
    "reloadContinuationItemsCommand.continuationItems",
];

// Pre-2021 responses.
const SECTION_ITEMS: &[&str] = &[
    "continuationContents.itemSectionContinuation.contents",
    "continuationContents.commentSectionContinuation.items",
];

const ITEM_TOKEN: &[&str] = &[
    "continuationItemRenderer.continuationEndpoint.continuationCommand.token",
    "continuationItemRenderer.button.buttonRenderer.command.continuationCommand.token",
];

// Page-level fallbacks. The first `next` call for a video carries the comment
// section token inside the watch-next results instead of an endpoint action.
const PAGE_TOKEN: &[&str] = &[
    "contents.twoColumnWatchNextResults.results.results.contents[*].itemSectionRenderer.contents[*].continuationItemRenderer.continuationEndpoint.continuationCommand.token",
    "engagementPanels[*].engagementPanelSectionListRenderer.content.sectionListRenderer.contents[*].itemSectionRenderer.contents[*].continuationItemRenderer.continuationEndpoint.continuationCommand.token",
    "continuationContents.itemSectionContinuation.continuations[0].nextContinuationData.continuation",
    "continuationContents.commentSectionContinuation.continuations[0].nextContinuationData.continuation",
];

const HEADER_COUNT: &[&str] = &[
    "commentsHeaderRenderer.countText",
    "commentsHeaderRenderer.commentsCount",
];

const MUTATIONS: &[&str] = &["frameworkUpdates.entityBatchUpdate.mutations"];

const VIEW_MODEL: &[&str] = &["commentViewModel.commentViewModel", "commentViewModel"];

/* --------- Legacy `commentRenderer` fields --------- */

const R_ID: &[&str] = &["commentId"];
const R_TEXT: &[&str] = &["contentText"];
const R_AUTHOR: &[&str] = &["authorText"];
const R_CHANNEL: &[&str] = &["authorEndpoint.browseEndpoint.browseId"];
const R_OWNER: &[&str] = &["authorIsChannelOwner"];
const R_VERIFIED: &[&str] = &["authorCommentBadge.authorCommentBadgeRenderer"];
const R_LIKES: &[&str] = &["voteCount", "likeCount"];
const R_REPLIES: &[&str] = &["replyCount"];
const R_PUBLISHED: &[&str] = &["publishedTimeText"];

/* --------- `commentEntityPayload` fields --------- */

const E_ID: &[&str] = &["properties.commentId"];
const E_TEXT: &[&str] = &["properties.content.content", "properties.content"];
const E_AUTHOR: &[&str] = &["author.displayName"];
const E_CHANNEL: &[&str] = &["author.channelId"];
const E_OWNER: &[&str] = &["author.isCreator"];
const E_VERIFIED: &[&str] = &["author.isVerified"];
const E_LIKES: &[&str] = &["toolbar.likeCountNotliked", "toolbar.likeCountA11y"];
const E_REPLIES: &[&str] = &["toolbar.replyCount"];
const E_PUBLISHED: &[&str] = &["properties.publishedTime"];

const REPLY_LIST: &[&str] = &["replies.commentRepliesRenderer.contents"];

/// Everything one `next` response contributes.
#[derive(Debug, Default)]
pub(crate) struct ParsedPage {
    pub(crate) items: Vec<CommentItem>,
    pub(crate) continuation: Option<String>,
    pub(crate) total_count_text: Option<String>,
}

type Entities<'a> = HashMap<&'a str, &'a Value>;

fn entities(resp: &Value) -> Entities<'_> {
    let Some(mutations) = json_path::get_array(resp, MUTATIONS) else {
        return HashMap::new();
    };
    mutations
        .iter()
        .filter_map(|m| {
            let payload = json_path::get(m, &["payload.commentEntityPayload"])?;
            let key = json_path::get_str(m, &["entityKey"])
                .or_else(|| json_path::get_str(payload, &["key"]))?;
            Some((key, payload))
        })
        .collect()
}

fn continuation_items(resp: &Value) -> Vec<&Value> {
    let mut out = Vec::new();
    if let Some(endpoints) = json_path::get_array(resp, &["onResponseReceivedEndpoints"]) {
        for ep in endpoints {
            if let Some(items) = json_path::get_array(ep, ENDPOINT_ITEMS) {
                out.extend(items);
            }
        }
    }
    if let Some(items) = json_path::get_array(resp, SECTION_ITEMS) {
        out.extend(items);
    }
    out
}

/// Parses comment threads, the next continuation token and the header count
/// out of a `next` response. Replies beyond `max_replies` are dropped.
pub(crate) fn parse_page(resp: &Value, max_replies: usize) -> ParsedPage {
    let ents = entities(resp);
    let mut page = ParsedPage::default();

    for item in continuation_items(resp) {
        if let Some(thread) = json_path::get(item, &["commentThreadRenderer"]) {
            if let Some(c) = thread_item(thread, &ents, max_replies) {
                page.items.push(c);
            }
            continue;
        }
        // Flat list entries (reply pages and old section continuations).
        if let Some(c) = comment_from_node(item, &ents) {
            page.items.push(c);
            continue;
        }
        if let Some(tok) = json_path::get_str(item, ITEM_TOKEN) {
            page.continuation = Some(tok.to_string());
            continue;
        }
        if page.total_count_text.is_none() {
            page.total_count_text = json_path::get(item, HEADER_COUNT).and_then(text_of);
        }
    }

    if page.continuation.is_none() {
        page.continuation = json_path::get_str(resp, PAGE_TOKEN).map(str::to_string);
    }
    page.continuation = page.continuation.filter(|t| !t.is_empty());
    page
}

fn thread_item(thread: &Value, ents: &Entities<'_>, max_replies: usize) -> Option<CommentItem> {
    let mut head = json_path::get(thread, &["comment"])
        .and_then(|c| comment_from_node(c, ents))
        .or_else(|| comment_from_node(thread, ents))?;

    if let Some(list) = json_path::get_array(thread, REPLY_LIST) {
        head.replies = list
            .iter()
            .filter_map(|r| comment_from_node(r, ents))
            .take(max_replies)
            .collect();
    }
    if head.reply_count == 0 {
        head.reply_count = head.replies.len() as u64;
    }
    Some(head)
}

fn comment_from_node(node: &Value, ents: &Entities<'_>) -> Option<CommentItem> {
    if let Some(r) = json_path::get(node, &["commentRenderer"]) {
        return from_renderer(r);
    }
    let vm = json_path::get(node, VIEW_MODEL)?;
    let key = json_path::get_str(vm, &["commentKey"])?;
    let payload = ents.get(key)?;
    from_entity(payload, vm)
}

fn count_at(v: &Value, candidates: &[&str]) -> Option<u64> {
    match json_path::get(v, candidates)? {
        Value::Number(n) => n.as_u64(),
        other => text_of(other).and_then(|s| parse_count(&s)),
    }
}

fn from_renderer(r: &Value) -> Option<CommentItem> {
    let comment_id = json_path::get_str(r, R_ID)?.to_string();
    Some(CommentItem {
        comment_id,
        author: CommentAuthor {
            name: json_path::get(r, R_AUTHOR)
                .and_then(text_of)
                .unwrap_or_default(),
            channel_id: json_path::get_str(r, R_CHANNEL).map(str::to_string),
            is_channel_owner: json_path::get_bool(r, R_OWNER).unwrap_or(false),
            is_verified: json_path::get(r, R_VERIFIED).is_some(),
        },
        text: json_path::get(r, R_TEXT).and_then(text_of).unwrap_or_default(),
        like_count: count_at(r, R_LIKES).unwrap_or(0),
        reply_count: count_at(r, R_REPLIES).unwrap_or(0),
        published_time: json_path::get(r, R_PUBLISHED).and_then(text_of),
        replies: Vec::new(),
    })
}

fn from_entity(p: &Value, view_model: &Value) -> Option<CommentItem> {
    let comment_id = json_path::get_str(p, E_ID)
        .or_else(|| json_path::get_str(view_model, &["commentId"]))?
        .to_string();
    Some(CommentItem {
        comment_id,
        author: CommentAuthor {
            name: json_path::get_str(p, E_AUTHOR)
                .unwrap_or_default()
                .to_string(),
            channel_id: json_path::get_str(p, E_CHANNEL).map(str::to_string),
            is_channel_owner: json_path::get_bool(p, E_OWNER).unwrap_or(false),
            is_verified: json_path::get_bool(p, E_VERIFIED).unwrap_or(false),
        },
        text: json_path::get(p, E_TEXT).and_then(text_of).unwrap_or_default(),
        like_count: count_at(p, E_LIKES).unwrap_or(0),
        reply_count: count_at(p, E_REPLIES).unwrap_or(0),
        published_time: json_path::get_str(p, E_PUBLISHED).map(str::to_string),
        replies: Vec::new(),
    })
}

