use super::frequency::FrequencyTable;
use crate::codes::codeword::Codeword;
use crate::codes::feedback::Feedback;

/// reorder codewords (and their feedbacks, in tandem) so that
/// codewords sharing a feedback become contiguous, in ascending
/// feedback ordinal. single pass of cursor-chasing swaps; the
/// frequency table supplies each cell's target region up front.
pub(crate) fn rearrange(
    codewords: &mut [Codeword],
    feedbacks: &mut [Feedback],
    freq: &FrequencyTable,
) {
    debug_assert!(codewords.len() == feedbacks.len());
    if codewords.is_empty() {
        return;
    }

    let size = freq.len();
    let mut end = vec![0usize; size + 1];
    let mut cursor = vec![0usize; size + 1];
    let mut i = 0;
    for k in 0..size {
        i += freq[k] as usize;
        end[k] = i;
        cursor[k + 1] = i;
    }
    end[size] = usize::MAX;

    // current cell: first non-empty one
    let mut k = 0;
    while freq[k] == 0 {
        k += 1;
    }

    let count = codewords.len();
    let mut i = 0;
    while i < count {
        let fb = feedbacks[i].ordinal();
        if fb == k {
            // already in its home cell; advance, hopping over
            // cells that have filled up
            cursor[k] += 1;
            if cursor[k] >= end[k] {
                k += 1;
                while cursor[k] >= end[k] {
                    k += 1;
                }
            }
            i = cursor[k];
        } else {
            // swap it into its home cell's next free slot
            let j = cursor[fb];
            cursor[fb] += 1;
            codewords.swap(i, j);
            feedbacks.swap(i, j);
        }
    }
}
