#![forbid(unsafe_code)]

use crate::textgen::{CompletionRequest, DEFAULT_MODEL, TextGenError};
use crate::{CatalogService, Design, ServiceError};
use mc_core::matching::{self, Candidate};
use mc_core::model::display_name;
use mc_storage::NicheDetailRow;

/// Below this many assigned designs the niche has too little seed context
/// for the collaborator; keyword matching is used instead.
pub const MIN_SEED_DESIGNS: usize = 3;

const PROMPT_EXISTING_CAP: usize = 30;
const PROMPT_POOL_CAP: usize = 200;
const MATCHING_TEMPERATURE: f32 = 0.2;

const SYSTEM_MESSAGE: &str = "You are an expert at pattern recognition and categorization. \
You must return ONLY comma-separated design names from the provided list, or 'NONE' if no \
matches exist.";

impl CatalogService {
    /// Candidate designs for a niche, up to 10. Read-only: confirming a
    /// suggestion happens through the assign operation.
    ///
    /// Tiers: no unassigned designs -> empty; fewer than
    /// [`MIN_SEED_DESIGNS`] assigned -> keyword matching on the niche name;
    /// otherwise the text-generation collaborator selects from the pool and
    /// its reply is resolved back to designs. A collaborator failure
    /// degrades to an empty list, never an error.
    pub fn niche_suggestions(&self, niche_id: &str) -> Result<Vec<Design>, ServiceError> {
        let detail = self
            .store
            .get_niche(niche_id)?
            .ok_or(ServiceError::NotFound("niche"))?;
        let unassigned = self.store.unassigned_designs()?;
        if unassigned.is_empty() {
            return Ok(Vec::new());
        }

        let pool: Vec<Candidate> = unassigned
            .iter()
            .map(|design| Candidate {
                id: design.id.clone(),
                display: display_name(&design.name, &design.clean_name).to_string(),
            })
            .collect();

        let suggested_ids = if detail.designs.len() < MIN_SEED_DESIGNS {
            let tokens = matching::keyword_tokens(&detail.niche.name);
            matching::keyword_matches(&tokens, &pool, matching::SUGGESTION_CAP)
        } else {
            match self.generated_suggestions(&detail, &pool) {
                Ok(ids) => ids,
                Err(err) => {
                    eprintln!(
                        "suggestions: text generation failed for niche {niche_id}, returning none: {err}"
                    );
                    Vec::new()
                }
            }
        };

        // Map ids back to rows, preserving resolution order.
        let designs = suggested_ids
            .iter()
            .filter_map(|id| unassigned.iter().find(|design| design.id == *id))
            .cloned()
            .map(Into::into)
            .collect();
        Ok(designs)
    }

    fn generated_suggestions(
        &self,
        detail: &NicheDetailRow,
        pool: &[Candidate],
    ) -> Result<Vec<String>, TextGenError> {
        let existing: Vec<&str> = detail
            .designs
            .iter()
            .take(PROMPT_EXISTING_CAP)
            .map(|assigned| display_name(&assigned.design.name, &assigned.design.clean_name))
            .collect();
        let pool_names: Vec<String> = pool.iter().map(|candidate| candidate.display.clone()).collect();
        let sampled = matching::sample_evenly(&pool_names, PROMPT_POOL_CAP);

        let reply = self.generator.complete(&CompletionRequest {
            model: DEFAULT_MODEL.to_string(),
            system: SYSTEM_MESSAGE.to_string(),
            prompt: build_matching_prompt(&detail.niche.name, &existing, &sampled),
            temperature: MATCHING_TEMPERATURE,
        })?;

        let tokens = matching::parse_completion_list(&reply);
        Ok(matching::resolve_against_pool(
            &tokens,
            pool,
            matching::SUGGESTION_CAP,
        ))
    }
}

fn build_matching_prompt(niche_name: &str, existing: &[&str], pool: &[String]) -> String {
    format!(
        "You are helping organize designs for a print-on-demand seller.\n\n\
         NICHE: \"{niche_name}\"\n\n\
         EXISTING DESIGNS IN THIS NICHE:\n{existing}\n\n\
         TASK: Analyze the pattern and theme of the existing designs above. Then, from the \
         unassigned designs below, select ONLY the ones that match the same theme.\n\n\
         UNASSIGNED DESIGNS TO CHOOSE FROM:\n{pool}\n\n\
         INSTRUCTIONS:\n\
         - Return ONLY the EXACT design names from the unassigned list that fit the niche theme\n\
         - Return up to 10 designs\n\
         - Return ONLY a comma-separated list of names, nothing else\n\
         - If no good matches exist, return \"NONE\"",
        existing = existing.join(", "),
        pool = pool.join(", "),
    )
}
