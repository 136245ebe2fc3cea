pub mod extractor;
pub mod segmenter;

use crate::config::Event;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Below this many blocks the thread pool costs more than it saves.
#[cfg(feature = "parallel")]
const PARALLEL_MIN_BLOCKS: usize = 4096;

/// Recover events from a pasted raw event log.
///
/// Never fails: text without any timestamp line yields an empty vec, and
/// malformed fields come back as empty strings.
pub fn parse(input: &str) -> Vec<Event> {
    let lines = segmenter::non_empty_lines(input);
    let blocks = segmenter::segment(&lines);

    #[cfg(feature = "parallel")]
    {
        if blocks.len() >= PARALLEL_MIN_BLOCKS {
            return blocks.par_iter().map(extractor::extract).collect();
        }
    }

    blocks.iter().map(extractor::extract).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const SAMPLE: &str = "Jan 05 10:30:00\nX\nY\n{\"customIDs\":{\"workspaceId\":\"w_123\"}}\nhttps://calendly.com/jane-doe-demo/30min\nZ";

    #[test]
    fn parse_sample() {
        let v = parse(SAMPLE);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].timestamp, "Jan 05 10:30:00");
        assert_eq!(v[0].workspace_id, "w_123");
        assert_eq!(v[0].ae_name, "Jane Doe");
    }

    #[test]
    fn four_part_slug_drops_suffix() {
        let raw = SAMPLE.replace("jane-doe-demo", "john-q-public-demo");
        assert_eq!(parse(&raw)[0].ae_name, "John Q Public");
    }

    #[test]
    fn empty_and_noise_inputs_yield_nothing() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n   \n").is_empty());
        assert!(parse("copied from a rich text view\nwith no timestamps").is_empty());
    }

    #[test]
    fn blank_lines_between_blocks_do_not_shift_offsets() {
        let raw = format!("\n\n{SAMPLE}\n\n\n{}\n", SAMPLE.replace("Jan 05", "Jan 06"));
        let v = parse(&raw);
        assert_eq!(v.len(), 2);
        assert_eq!(v[1].timestamp, "Jan 06 10:30:00");
        assert_eq!(v[1].workspace_id, "w_123");
    }

    #[test]
    fn crlf_line_endings_are_tolerated() {
        let v = parse(&SAMPLE.replace('\n', "\r\n"));
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].timestamp, "Jan 05 10:30:00");
        assert_eq!(v[0].ae_name, "Jane Doe");
    }

    #[test]
    fn whitespace_around_an_inner_timestamp_line_skips_the_block() {
        let raw = format!("noise\n  {}", SAMPLE.replacen("10:30:00", "10:30:00  ", 1));
        assert!(parse(&raw).is_empty());
    }

    #[test]
    fn whole_input_is_trimmed_before_splitting() {
        let v = parse(&format!("   {SAMPLE}   "));
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].timestamp, "Jan 05 10:30:00");
    }

    fn block_strategy() -> impl Strategy<Value = (String, String, String)> {
        (
            "(Jan|Feb|Mar|Dec) [0-3][0-9] [0-2][0-9]:[0-5][0-9]:[0-5][0-9]",
            "[a-z0-9_]{1,12}",
            "[a-z]{1,6}(-[a-z]{1,6}){0,3}",
        )
    }

    proptest! {
        #[test]
        fn n_blocks_give_n_events_in_order(blocks in prop::collection::vec(block_strategy(), 0..20)) {
            let raw: String = blocks
                .iter()
                .map(|(ts, ws, slug)| {
                    format!(
                        "{ts}\nfiller\nfiller\n{{\"customIDs\":{{\"workspaceId\":\"{ws}\"}}}}\nhttps://calendly.com/{slug}/30min\nfiller\n"
                    )
                })
                .collect();
            let events = parse(&raw);
            prop_assert_eq!(events.len(), blocks.len());
            for (event, (ts, ws, _)) in events.iter().zip(&blocks) {
                prop_assert_eq!(&event.timestamp, ts);
                prop_assert_eq!(&event.workspace_id, ws);
            }
            prop_assert_eq!(parse(&raw), events);
        }

        #[test]
        fn never_panics_on_arbitrary_text(raw in "(?s).{0,400}") {
            let _ = parse(&raw);
        }
    }
}
