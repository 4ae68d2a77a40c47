use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::{json, ApiErr, ApiResp, Ctx, Result};
use crate::models::{Stats, SuggestQuery, TermFreq};

/// Suggestions response: plain terms, or terms with frequencies (?scores=true).
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Suggestions {
    Terms(Vec<String>),
    Scored(Vec<TermFreq>),
}

/// Insert body: a single term or a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TermsBody {
    One(TermFreq),
    Many(Vec<TermFreq>),
}

/// Get ranked suggestions for a prefix. An empty prefix returns the overall top terms.
pub async fn get_suggestions(
    State(ctx): State<Arc<Ctx>>,
    Query(query): Query<SuggestQuery>,
) -> Result<ApiResp<Suggestions>> {
    let prefix = ctx.normalize(&query.q);

    let ac = ctx.ac.read()?;
    let out = if query.scores {
        Suggestions::Scored(
            ac.top_matches(&prefix)
                .into_iter()
                .map(|(term, frequency)| TermFreq { term, frequency })
                .collect(),
        )
    } else {
        Suggestions::Terms(ac.suggestions(&prefix))
    };

    Ok(json(out))
}

/// Get the current frequency of a term.
pub async fn get_term(
    State(ctx): State<Arc<Ctx>>,
    Path(term): Path<String>,
) -> Result<ApiResp<TermFreq>> {
    let term = ctx.normalize(&term);

    let frequency = ctx
        .ac
        .read()?
        .frequency(&term)
        .ok_or_else(|| ApiErr::new("term not found", StatusCode::NOT_FOUND))?;

    Ok(json(TermFreq { term, frequency }))
}

/// Get index stats.
pub async fn get_stats(State(ctx): State<Arc<Ctx>>) -> Result<ApiResp<Stats>> {
    let ac = ctx.ac.read()?;
    Ok(json(Stats {
        terms: ac.len(),
        nodes: ac.num_nodes(),
        top_k: ac.top_k(),
    }))
}

/// Insert or update one or more terms. The whole batch is validated before
/// anything is written.
pub async fn insert_terms(
    State(ctx): State<Arc<Ctx>>,
    Json(body): Json<TermsBody>,
) -> Result<ApiResp<usize>> {
    let items = match body {
        TermsBody::One(t) => vec![t],
        TermsBody::Many(v) => v,
    };

    let mut terms = Vec::with_capacity(items.len());
    for t in items {
        let term = ctx.normalize(&t.term);
        if term.is_empty() {
            return Err(ApiErr::new(
                format!("invalid term: '{}'", t.term),
                StatusCode::BAD_REQUEST,
            ));
        }
        terms.push((term, t.frequency));
    }

    let mut ac = ctx.ac.write()?;
    for (term, freq) in &terms {
        ac.insert(term, *freq);
    }
    drop(ac);

    log::info!("inserted {} terms", terms.len());
    Ok(json(terms.len()))
}
