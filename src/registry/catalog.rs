// The descriptor table, in display order

use super::{AlgorithmDescriptor, Complexity, Family, ParamSpec};
use crate::algorithms::{analysis, distribution, searching, sorting, strings};
use crate::input::Notation;

const TARGET: ParamSpec = ParamSpec::number("target", "Target value", -1_000_000, 1_000_000, None);

const fn complexity(
    best: &'static str,
    average: &'static str,
    worst: &'static str,
    space: &'static str,
) -> Complexity {
    Complexity {
        best,
        average,
        worst,
        space,
    }
}

pub static CATALOG: &[AlgorithmDescriptor] = &[
    // Comparison sorts
    AlgorithmDescriptor {
        id: "bubble-sort",
        name: "Bubble sort",
        family: Family::Sorting,
        notation: Notation::ArrayLiteral,
        pseudocode: &[
            "for i in 0..n-1:",
            "  swapped = false",
            "  for j in 0..n-1-i:",
            "    if a[j] > a[j+1]:",
            "      swap(a[j], a[j+1]); swapped = true",
            "  if not swapped: break",
        ],
        complexity: complexity("O(n)", "O(n²)", "O(n²)", "O(1)"),
        params: &[],
        rearranging: true,
        generator: sorting::bubble_sort,
    },
    AlgorithmDescriptor {
        id: "selection-sort",
        name: "Selection sort",
        family: Family::Sorting,
        notation: Notation::ArrayLiteral,
        pseudocode: &[
            "for i in 0..n-1:",
            "  min = i",
            "  for j in i+1..n:",
            "    if a[j] < a[min]: min = j",
            "  if min != i: swap(a[i], a[min])",
        ],
        complexity: complexity("O(n²)", "O(n²)", "O(n²)", "O(1)"),
        params: &[],
        rearranging: true,
        generator: sorting::selection_sort,
    },
    AlgorithmDescriptor {
        id: "insertion-sort",
        name: "Insertion sort",
        family: Family::Sorting,
        notation: Notation::ArrayLiteral,
        pseudocode: &[
            "for i in 1..n:",
            "  key = a[i]; j = i - 1",
            "  while j >= 0 and a[j] > key:",
            "    a[j+1] = a[j]; j -= 1",
            "  a[j+1] = key",
        ],
        complexity: complexity("O(n)", "O(n²)", "O(n²)", "O(1)"),
        params: &[],
        rearranging: true,
        generator: sorting::insertion_sort,
    },
    AlgorithmDescriptor {
        id: "quick-sort",
        name: "Quick sort",
        family: Family::Sorting,
        notation: Notation::ArrayLiteral,
        pseudocode: &[
            "quicksort(lo, hi):",
            "  if lo >= hi: return",
            "  pivot = a[hi]; i = lo",
            "  for j in lo..hi:",
            "    if a[j] <= pivot: swap(a[i], a[j]); i += 1",
            "  swap(a[i], a[hi])",
            "  quicksort(lo, i-1); quicksort(i+1, hi)",
        ],
        complexity: complexity("O(n log n)", "O(n log n)", "O(n²)", "O(log n)"),
        params: &[ParamSpec::select(
            "pivot",
            "Pivot",
            &["last", "middle"],
            "last",
        )],
        rearranging: true,
        generator: sorting::quick_sort,
    },
    AlgorithmDescriptor {
        id: "merge-sort",
        name: "Merge sort",
        family: Family::Sorting,
        notation: Notation::ArrayLiteral,
        pseudocode: &[
            "mergesort(lo, hi):",
            "  if hi - lo < 1: return",
            "  mid = (lo + hi) / 2",
            "  mergesort(lo, mid); mergesort(mid+1, hi)",
            "  merge a[lo..=mid] and a[mid+1..=hi]",
        ],
        complexity: complexity("O(n log n)", "O(n log n)", "O(n log n)", "O(n)"),
        params: &[],
        rearranging: true,
        generator: sorting::merge_sort,
    },
    AlgorithmDescriptor {
        id: "heap-sort",
        name: "Heap sort",
        family: Family::Sorting,
        notation: Notation::ArrayLiteral,
        pseudocode: &[
            "for i in (0..n/2).rev(): sift_down(i, n)",
            "for end in (1..n).rev():",
            "  swap(a[0], a[end])",
            "  sift_down(0, end)",
        ],
        complexity: complexity("O(n log n)", "O(n log n)", "O(n log n)", "O(1)"),
        params: &[],
        rearranging: true,
        generator: sorting::heap_sort,
    },
    AlgorithmDescriptor {
        id: "shell-sort",
        name: "Shell sort",
        family: Family::Sorting,
        notation: Notation::ArrayLiteral,
        pseudocode: &[
            "for gap in gaps:",
            "  for i in gap..n:",
            "    key = a[i]; j = i",
            "    while j >= gap and a[j-gap] > key:",
            "      a[j] = a[j-gap]; j -= gap",
            "    a[j] = key",
        ],
        complexity: complexity("O(n log n)", "O(n^1.25)", "O(n²)", "O(1)"),
        params: &[ParamSpec::select(
            "gaps",
            "Gap sequence",
            &["shell", "knuth"],
            "shell",
        )],
        rearranging: true,
        generator: sorting::shell_sort,
    },
    AlgorithmDescriptor {
        id: "tim-sort",
        name: "Tim sort",
        family: Family::Sorting,
        notation: Notation::ArrayLiteral,
        pseudocode: &[
            "for each run of minRun elements: insertion sort it",
            "size = minRun",
            "while size < n:",
            "  merge neighbouring runs of length size",
            "  size *= 2",
        ],
        complexity: complexity("O(n)", "O(n log n)", "O(n log n)", "O(n)"),
        params: &[ParamSpec::number("minRun", "Minimum run", 2, 16, Some(4))],
        rearranging: true,
        generator: sorting::tim_sort,
    },
    // Distribution sorts
    AlgorithmDescriptor {
        id: "counting-sort",
        name: "Counting sort",
        family: Family::Distribution,
        notation: Notation::ArrayLiteral,
        pseudocode: &[
            "count = zeros(max - min + 1)",
            "for x in a: count[x - min] += 1",
            "k = 0",
            "for v in min..=max:",
            "  repeat count[v - min] times: a[k] = v; k += 1",
        ],
        complexity: complexity("O(n + k)", "O(n + k)", "O(n + k)", "O(k)"),
        params: &[],
        rearranging: true,
        generator: distribution::counting_sort,
    },
    AlgorithmDescriptor {
        id: "radix-sort",
        name: "Radix sort",
        family: Family::Distribution,
        notation: Notation::ArrayLiteral,
        pseudocode: &[
            "exp = 1",
            "while max / exp > 0:",
            "  distribute a into buckets by (x / exp) % base",
            "  collect buckets in order back into a",
            "  exp *= base",
        ],
        complexity: complexity("O(d·(n + b))", "O(d·(n + b))", "O(d·(n + b))", "O(n + b)"),
        params: &[ParamSpec::select(
            "base",
            "Base",
            &["2", "10", "16"],
            "10",
        )],
        rearranging: true,
        generator: distribution::radix_sort,
    },
    AlgorithmDescriptor {
        id: "bucket-sort",
        name: "Bucket sort",
        family: Family::Distribution,
        notation: Notation::ArrayLiteral,
        pseudocode: &[
            "for x in a: bucket[(x - min) * k / span].push(x)",
            "for b in buckets: insertion sort b",
            "concatenate buckets back into a",
        ],
        complexity: complexity("O(n + k)", "O(n + k)", "O(n²)", "O(n + k)"),
        params: &[ParamSpec::number("buckets", "Buckets", 1, 10, Some(4))],
        rearranging: true,
        generator: distribution::bucket_sort,
    },
    // Searching
    AlgorithmDescriptor {
        id: "linear-search",
        name: "Linear search",
        family: Family::Searching,
        notation: Notation::ArrayLiteral,
        pseudocode: &[
            "for i in 0..n:",
            "  if a[i] == target: return i",
            "return none",
        ],
        complexity: complexity("O(1)", "O(n)", "O(n)", "O(1)"),
        params: &[TARGET],
        rearranging: false,
        generator: searching::linear_search,
    },
    AlgorithmDescriptor {
        id: "binary-search",
        name: "Binary search",
        family: Family::Searching,
        notation: Notation::ArrayLiteral,
        pseudocode: &[
            "low = 0; high = n - 1",
            "while low <= high:",
            "  mid = low + (high - low) / 2",
            "  if a[mid] == target: return mid",
            "  if a[mid] < target: low = mid + 1",
            "  else: high = mid - 1",
            "return none",
        ],
        complexity: complexity("O(1)", "O(log n)", "O(log n)", "O(1)"),
        params: &[TARGET],
        rearranging: false,
        generator: searching::binary_search,
    },
    AlgorithmDescriptor {
        id: "jump-search",
        name: "Jump search",
        family: Family::Searching,
        notation: Notation::ArrayLiteral,
        pseudocode: &[
            "step = floor(sqrt(n)); prev = 0",
            "while a[min(step, n) - 1] < target:",
            "  prev = step; step += floor(sqrt(n))",
            "  if prev >= n: return none",
            "for i in prev..min(step, n):",
            "  if a[i] == target: return i",
            "return none",
        ],
        complexity: complexity("O(1)", "O(√n)", "O(√n)", "O(1)"),
        params: &[TARGET],
        rearranging: false,
        generator: searching::jump_search,
    },
    AlgorithmDescriptor {
        id: "two-pointer-sum",
        name: "Two-pointer pair sum",
        family: Family::Searching,
        notation: Notation::ArrayLiteral,
        pseudocode: &[
            "i = 0; j = n - 1",
            "while i < j:",
            "  s = a[i] + a[j]",
            "  if s == target: return [i, j]",
            "  if s < target: i += 1 else: j -= 1",
            "return []",
        ],
        complexity: complexity("O(1)", "O(n)", "O(n)", "O(1)"),
        params: &[TARGET],
        rearranging: false,
        generator: searching::two_pointer_sum,
    },
    // Array analysis
    AlgorithmDescriptor {
        id: "majority-element",
        name: "Majority element",
        family: Family::Analysis,
        notation: Notation::ArrayLiteral,
        pseudocode: &[
            "candidate = none; count = 0",
            "for x in a:",
            "  if count == 0: candidate = x; count = 1",
            "  elif x == candidate: count += 1",
            "  else: count -= 1",
            "verify: candidate occurs more than n / 2 times",
        ],
        complexity: complexity("O(n)", "O(n)", "O(n)", "O(1)"),
        params: &[],
        rearranging: false,
        generator: analysis::majority_element,
    },
    AlgorithmDescriptor {
        id: "mode",
        name: "Mode",
        family: Family::Analysis,
        notation: Notation::ArrayLiteral,
        pseudocode: &[
            "counts = {}; best = none",
            "for x in a:",
            "  counts[x] += 1",
            "  if counts[x] > best.count",
            "     or (counts[x] == best.count and x < best.value):",
            "    best = (x, counts[x])",
        ],
        complexity: complexity("O(n log n)", "O(n log n)", "O(n log n)", "O(n)"),
        params: &[],
        rearranging: false,
        generator: analysis::mode,
    },
    // Strings & stacks
    AlgorithmDescriptor {
        id: "balanced-brackets",
        name: "Balanced brackets",
        family: Family::Strings,
        notation: Notation::BracketString,
        pseudocode: &[
            "stack = []",
            "for c in s:",
            "  if c is an opener: stack.push(c)",
            "  elif stack is empty or stack.pop() does not pair with c:",
            "    return false",
            "return stack is empty",
        ],
        complexity: complexity("O(n)", "O(n)", "O(n)", "O(n)"),
        params: &[],
        rearranging: false,
        generator: strings::balanced_brackets,
    },
    AlgorithmDescriptor {
        id: "reverse-string",
        name: "Reverse string",
        family: Family::Strings,
        notation: Notation::Text,
        pseudocode: &[
            "i = 0; j = n - 1",
            "while i < j:",
            "  swap(s[i], s[j])",
            "  i += 1; j -= 1",
        ],
        complexity: complexity("O(n)", "O(n)", "O(n)", "O(1)"),
        params: &[],
        rearranging: true,
        generator: strings::reverse_string,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ParamKind, Params};

    /// A small input that satisfies every algorithm's preconditions
    fn sample(descriptor: &AlgorithmDescriptor) -> Vec<i64> {
        match descriptor.notation {
            Notation::BracketString => "([]{})".chars().map(|c| c as i64).collect(),
            Notation::Text => "trace".chars().map(|c| c as i64).collect(),
            Notation::ArrayLiteral => vec![1, 3, 3, 5, 8, 9],
        }
    }

    #[test]
    fn test_every_algorithm_generates() {
        for descriptor in CATALOG {
            let params = if descriptor.param("target").is_some() {
                Params::new().with_number("target", 8)
            } else {
                Params::new()
            };
            let input = sample(descriptor);
            let trace = descriptor
                .generate(&input, &params)
                .unwrap_or_else(|e| panic!("{}: {}", descriptor.id, e));
            assert!(trace.total_steps() > 0, "{}", descriptor.id);
            assert_eq!(trace.initial().array_state, input, "{}", descriptor.id);
        }
    }

    #[test]
    fn test_defaults_are_valid_options() {
        for descriptor in CATALOG {
            for spec in descriptor.params {
                match spec.kind {
                    ParamKind::Select { options, default } => {
                        assert!(options.contains(&default), "{}.{}", descriptor.id, spec.id)
                    }
                    ParamKind::Number { min, max, default } => {
                        if let Some(d) = default {
                            assert!((min..=max).contains(&d), "{}.{}", descriptor.id, spec.id);
                        }
                    }
                }
            }
        }
    }
}
