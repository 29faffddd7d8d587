use log::{debug, info};
use regex::{NoExpand, Regex};

use crate::constants::emoji::{FALLBACK_EMOJI, REGION_EMOJIS};
use crate::models::{Proxy, RenameRule, TransformSettings};
use crate::utils::string::locale_compare;

/// Keeps nodes whose remark contains at least one include keyword, then
/// drops nodes whose remark contains any exclude keyword.
///
/// Matching is a case-sensitive substring test. An empty keyword list
/// disables the corresponding stage.
pub fn filter_nodes(nodes: Vec<Proxy>, include: &[String], exclude: &[String]) -> Vec<Proxy> {
    nodes
        .into_iter()
        .filter(|node| include.is_empty() || include.iter().any(|kw| node.remark.contains(kw.as_str())))
        .filter(|node| !exclude.iter().any(|kw| node.remark.contains(kw.as_str())))
        .collect()
}

/// A rename rule ready to run; patterns that are not valid regexes are
/// replaced literally.
struct CompiledRename {
    regex: Regex,
    replace: String,
}

fn compile_renames(rules: &[RenameRule]) -> Vec<CompiledRename> {
    rules
        .iter()
        .filter_map(|rule| {
            let regex = Regex::new(&rule.pattern)
                .or_else(|_| Regex::new(&regex::escape(&rule.pattern)))
                .ok()?;
            Some(CompiledRename {
                regex,
                replace: rule.replace.clone(),
            })
        })
        .collect()
}

/// Applies every rule in order, each one replacing all matches in the
/// output of the previous one. Replacement text is inserted literally.
fn node_rename(remark: &str, renames: &[CompiledRename]) -> String {
    renames.iter().fold(remark.to_string(), |current, rule| {
        rule.regex
            .replace_all(&current, NoExpand(&rule.replace))
            .into_owned()
    })
}

fn has_emoji_prefix(remark: &str) -> bool {
    REGION_EMOJIS
        .iter()
        .map(|(_, emoji)| *emoji)
        .chain(std::iter::once(FALLBACK_EMOJI))
        .any(|emoji| {
            remark
                .strip_prefix(emoji)
                .is_some_and(|rest| rest.starts_with(' '))
        })
}

/// Prefixes the remark with the flag of the first region whose keyword it
/// contains, or the generic globe. A remark that already carries one of
/// these prefixes is returned unchanged.
pub fn add_emoji(remark: &str) -> String {
    if has_emoji_prefix(remark) {
        return remark.to_string();
    }

    let emoji = REGION_EMOJIS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| remark.contains(kw)))
        .map_or(FALLBACK_EMOJI, |(_, emoji)| *emoji);
    format!("{} {}", emoji, remark)
}

/// Stable sort by remark using locale-aware comparison
pub fn sort_nodes(mut nodes: Vec<Proxy>) -> Vec<Proxy> {
    nodes.sort_by(|a, b| locale_compare(&a.remark, &b.remark));
    nodes
}

/// Runs the transform chain: include, exclude, rename, emoji, sort.
///
/// The order is fixed so that filters always see the remarks as the
/// subscription delivered them, whichever path (single or merged) calls in.
pub fn preprocess_nodes(nodes: Vec<Proxy>, settings: &TransformSettings) -> Vec<Proxy> {
    let before = nodes.len();
    let mut nodes = filter_nodes(nodes, &settings.include_remarks, &settings.exclude_remarks);
    if nodes.len() != before {
        debug!("Filtered out {} of {} nodes", before - nodes.len(), before);
    }

    if !settings.rename_array.is_empty() {
        let renames = compile_renames(&settings.rename_array);
        nodes = nodes
            .iter()
            .map(|node| node.with_remark(node_rename(&node.remark, &renames)))
            .collect();
    }

    if settings.add_emoji {
        nodes = nodes
            .iter()
            .map(|node| node.with_remark(add_emoji(&node.remark)))
            .collect();
    }

    if settings.sort_flag {
        info!("Sorting {} nodes", nodes.len());
        nodes = sort_nodes(nodes);
    }

    debug!("Node preprocessing completed for {} nodes", nodes.len());
    nodes
}
