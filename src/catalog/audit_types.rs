//! Static audit-type table. Each audit type maps an agent count to the
//! ordered roles that run one after another inside its epic.

use super::{AuditType, RoleConfig, RoleTemplate};

const fn role(
    code_name: &'static str,
    title: &'static str,
    guidance: &'static str,
) -> RoleTemplate {
    RoleTemplate {
        code_name,
        title,
        guidance,
    }
}

pub static AUDIT_TYPES: &[AuditType] = &[
    AuditType {
        id: "perf",
        name: "Performance Audit",
        bead_prefix: "perf",
        description: "Find bottlenecks that slow interaction, rendering, and page load.",
        focus_areas: &[
            "render throughput and frame stability",
            "bundle size and code splitting",
            "network waterfalls and request priority",
            "critical rendering path and hydration",
            "cache strategy for static and API assets",
            "hot path profiling for user journeys",
        ],
        role_configs: &[
            RoleConfig {
                agent_count: 1,
                roles: &[
                    role(
                        "alpha",
                        "Senior performance specialist",
                        "Own full audit scope, prioritize highest-impact bottlenecks, and deliver a sequenced remediation plan.",
                    ),
                ],
            },
            RoleConfig {
                agent_count: 2,
                roles: &[
                    role(
                        "alpha",
                        "Senior performance specialist",
                        "Lead architecture analysis, triage bottlenecks by business impact, and define acceptance criteria for fixes.",
                    ),
                    role(
                        "bravo",
                        "Staff performance engineer",
                        "Run traces and benchmarks, validate hypotheses, and provide measurement-backed implementation recommendations.",
                    ),
                ],
            },
            RoleConfig {
                agent_count: 3,
                roles: &[
                    role(
                        "alpha",
                        "Senior performance specialist",
                        "Coordinate scope, synthesize findings, and sequence improvements into delivery-ready work items.",
                    ),
                    role(
                        "bravo",
                        "Staff performance engineer",
                        "Drive instrumentation and profiling, then document regression guards for each hotspot.",
                    ),
                    role(
                        "charlie",
                        "Runtime optimization specialist",
                        "Deep dive into rendering and runtime internals such as scheduling, hydration, and memory churn.",
                    ),
                ],
            },
        ],
    },
    AuditType {
        id: "memleak",
        name: "Memory Leak Audit",
        bead_prefix: "mem",
        description: "Detect memory retention patterns that degrade long-running sessions.",
        focus_areas: &[
            "event listener lifecycle cleanup",
            "detached DOM and closure retention",
            "timer and interval disposal",
            "cache growth bounds and eviction",
            "stream and subscription teardown",
            "heap snapshot diff investigation",
        ],
        role_configs: &[
            RoleConfig {
                agent_count: 1,
                roles: &[
                    role(
                        "alpha",
                        "Senior memory specialist",
                        "Lead retention-path analysis, isolate leak vectors, and propose pragmatic cleanup patterns.",
                    ),
                ],
            },
            RoleConfig {
                agent_count: 2,
                roles: &[
                    role(
                        "alpha",
                        "Senior memory specialist",
                        "Prioritize user-visible leak risks and define reproducible investigation scenarios.",
                    ),
                    role(
                        "bravo",
                        "Staff diagnostics engineer",
                        "Capture heap snapshots and allocation timelines, then map retained objects to code ownership.",
                    ),
                ],
            },
            RoleConfig {
                agent_count: 3,
                roles: &[
                    role(
                        "alpha",
                        "Senior memory specialist",
                        "Coordinate findings across features and enforce cleanup standards for long-lived views.",
                    ),
                    role(
                        "bravo",
                        "Staff diagnostics engineer",
                        "Produce high-signal reproduction traces and validate memory improvements after fixes.",
                    ),
                    role(
                        "charlie",
                        "Garbage collection domain specialist",
                        "Analyze allocator behavior, object tenure, and runtime-specific memory semantics.",
                    ),
                ],
            },
        ],
    },
    AuditType {
        id: "lighthouse",
        name: "Lighthouse Score",
        bead_prefix: "lh",
        description: "Raise Lighthouse scores with targeted improvements across key categories.",
        focus_areas: &[
            "core web vitals diagnostics",
            "accessibility rule failures",
            "SEO metadata and crawlability",
            "best practices and security headers",
            "third-party script impact",
            "repeatable lab test baselines",
        ],
        role_configs: &[
            RoleConfig {
                agent_count: 1,
                roles: &[
                    role(
                        "alpha",
                        "Senior web quality specialist",
                        "Own Lighthouse strategy end to end and prioritize fixes that improve both scores and real UX.",
                    ),
                ],
            },
            RoleConfig {
                agent_count: 2,
                roles: &[
                    role(
                        "alpha",
                        "Senior web quality specialist",
                        "Set category targets, identify blocking regressions, and define implementation order.",
                    ),
                    role(
                        "bravo",
                        "Staff frontend engineer",
                        "Execute metric-specific optimizations and produce before-and-after score evidence.",
                    ),
                ],
            },
            RoleConfig {
                agent_count: 3,
                roles: &[
                    role(
                        "alpha",
                        "Senior web quality specialist",
                        "Drive overall scoring plan and align quality goals with release milestones.",
                    ),
                    role(
                        "bravo",
                        "Staff frontend engineer",
                        "Implement rendering and loading improvements with measurable metric impact.",
                    ),
                    role(
                        "charlie",
                        "Search and accessibility specialist",
                        "Focus on SEO and accessibility category wins while preserving product semantics.",
                    ),
                ],
            },
        ],
    },
    AuditType {
        id: "security",
        name: "Security Audit",
        bead_prefix: "sec",
        description: "Identify exploitable risks and harden the application against common attacks.",
        focus_areas: &[
            "xss and output encoding boundaries",
            "authentication and session controls",
            "authorization checks and privilege boundaries",
            "injection vectors across data layers",
            "secrets handling and transport security",
            "owasp aligned risk prioritization",
        ],
        role_configs: &[
            RoleConfig {
                agent_count: 1,
                roles: &[
                    role(
                        "alpha",
                        "Senior security specialist",
                        "Lead threat-focused review, rank vulnerabilities by exploitability, and define mitigation plan.",
                    ),
                ],
            },
            RoleConfig {
                agent_count: 2,
                roles: &[
                    role(
                        "alpha",
                        "Senior security specialist",
                        "Own threat model, coordinate remediation priorities, and set validation criteria.",
                    ),
                    role(
                        "bravo",
                        "Staff application security engineer",
                        "Perform code-level verification, build proof-of-concept checks, and document secure alternatives.",
                    ),
                ],
            },
            RoleConfig {
                agent_count: 3,
                roles: &[
                    role(
                        "alpha",
                        "Senior security specialist",
                        "Coordinate multi-surface risk analysis and package findings for rapid triage.",
                    ),
                    role(
                        "bravo",
                        "Staff application security engineer",
                        "Validate code paths and exploitability, then propose safe refactors with tests.",
                    ),
                    role(
                        "charlie",
                        "Identity and cryptography specialist",
                        "Deep dive on auth flows, token lifecycles, and cryptographic control correctness.",
                    ),
                ],
            },
        ],
    },
    AuditType {
        id: "maint",
        name: "Code Maintainability",
        bead_prefix: "maint",
        description: "Improve code health, readability, and long-term development velocity.",
        focus_areas: &[
            "cyclomatic complexity hotspots",
            "naming and abstraction clarity",
            "error handling consistency",
            "test coverage and reliability gaps",
            "module boundaries and coupling",
            "technical debt triage and payoff",
        ],
        role_configs: &[
            RoleConfig {
                agent_count: 1,
                roles: &[
                    role(
                        "alpha",
                        "Senior maintainability specialist",
                        "Own health assessment, identify high-friction patterns, and sequence refactoring recommendations.",
                    ),
                ],
            },
            RoleConfig {
                agent_count: 2,
                roles: &[
                    role(
                        "alpha",
                        "Senior maintainability specialist",
                        "Define modernization priorities and align improvements with team delivery cadence.",
                    ),
                    role(
                        "bravo",
                        "Staff software architect",
                        "Map dependency and module structure, then propose changes that reduce coupling and ambiguity.",
                    ),
                ],
            },
            RoleConfig {
                agent_count: 3,
                roles: &[
                    role(
                        "alpha",
                        "Senior maintainability specialist",
                        "Coordinate architecture and code-quality findings into a phased execution roadmap.",
                    ),
                    role(
                        "bravo",
                        "Staff software architect",
                        "Lead decomposition strategy and identify safe migration seams for large refactors.",
                    ),
                    role(
                        "charlie",
                        "Testing strategy specialist",
                        "Close testability gaps and define automated guardrails for sustained maintainability.",
                    ),
                ],
            },
        ],
    },
    AuditType {
        id: "xbrowser",
        name: "Cross-browser Issues",
        bead_prefix: "xbr",
        description: "Surface browser-specific regressions and ensure consistent behavior.",
        focus_areas: &[
            "css feature compatibility",
            "javascript api support differences",
            "layout and rendering engine quirks",
            "input and event model variance",
            "polyfill and fallback strategy",
            "visual regression across browsers",
        ],
        role_configs: &[
            RoleConfig {
                agent_count: 1,
                roles: &[
                    role(
                        "alpha",
                        "Senior compatibility specialist",
                        "Own browser matrix triage and deliver fixes that preserve behavior across target platforms.",
                    ),
                ],
            },
            RoleConfig {
                agent_count: 2,
                roles: &[
                    role(
                        "alpha",
                        "Senior compatibility specialist",
                        "Prioritize breakages by user share and define target support policy.",
                    ),
                    role(
                        "bravo",
                        "Staff frontend platform engineer",
                        "Reproduce engine-specific bugs, implement cross-browser fixes, and validate parity.",
                    ),
                ],
            },
            RoleConfig {
                agent_count: 3,
                roles: &[
                    role(
                        "alpha",
                        "Senior compatibility specialist",
                        "Coordinate browser coverage and convert findings into actionable implementation batches.",
                    ),
                    role(
                        "bravo",
                        "Staff frontend platform engineer",
                        "Lead technical remediation and maintain compatibility test fixtures.",
                    ),
                    role(
                        "charlie",
                        "Design systems specialist",
                        "Validate component-level visual and interaction consistency across engines.",
                    ),
                ],
            },
        ],
    },
    AuditType {
        id: "a11y",
        name: "Accessibility Audit",
        bead_prefix: "a11y",
        description: "Improve inclusive usability and compliance with accessibility standards.",
        focus_areas: &[
            "wcag success criteria coverage",
            "keyboard navigation and focus flow",
            "screen reader semantics and labels",
            "color contrast and visual cues",
            "forms and error feedback accessibility",
            "accessible component interaction patterns",
        ],
        role_configs: &[
            RoleConfig {
                agent_count: 1,
                roles: &[
                    role(
                        "alpha",
                        "Senior accessibility specialist",
                        "Own standards-based review and prioritize changes that unblock assistive technology users.",
                    ),
                ],
            },
            RoleConfig {
                agent_count: 2,
                roles: &[
                    role(
                        "alpha",
                        "Senior accessibility specialist",
                        "Set WCAG priority matrix and guide remediation design decisions.",
                    ),
                    role(
                        "bravo",
                        "Staff inclusive UX engineer",
                        "Implement semantic fixes and validate journeys with keyboard and screen reader testing.",
                    ),
                ],
            },
            RoleConfig {
                agent_count: 3,
                roles: &[
                    role(
                        "alpha",
                        "Senior accessibility specialist",
                        "Coordinate audit scope and publish high-confidence remediation priorities.",
                    ),
                    role(
                        "bravo",
                        "Staff inclusive UX engineer",
                        "Deliver implementation guidance and verify behavior in assistive tooling.",
                    ),
                    role(
                        "charlie",
                        "Content and language specialist",
                        "Assess copy, instructions, and messaging clarity for cognitive accessibility.",
                    ),
                ],
            },
        ],
    },
    AuditType {
        id: "errhandling",
        name: "Error Handling Audit",
        bead_prefix: "err",
        description: "Strengthen resilience by improving failure detection and recovery paths.",
        focus_areas: &[
            "unhandled exceptions and panic boundaries",
            "error boundary and fallback UX",
            "retry logic and backoff policies",
            "timeout handling and cancellation",
            "observability and diagnostic context",
            "failure mode and effect analysis",
        ],
        role_configs: &[
            RoleConfig {
                agent_count: 1,
                roles: &[
                    role(
                        "alpha",
                        "Senior reliability specialist",
                        "Own end-to-end resilience review and define standards for robust failure handling.",
                    ),
                ],
            },
            RoleConfig {
                agent_count: 2,
                roles: &[
                    role(
                        "alpha",
                        "Senior reliability specialist",
                        "Prioritize critical failure paths and set acceptable recovery expectations.",
                    ),
                    role(
                        "bravo",
                        "Staff platform reliability engineer",
                        "Review boundary handling, retries, and telemetry to improve diagnosis and containment.",
                    ),
                ],
            },
            RoleConfig {
                agent_count: 3,
                roles: &[
                    role(
                        "alpha",
                        "Senior reliability specialist",
                        "Coordinate resilience strategy and sequence improvements for high-risk flows first.",
                    ),
                    role(
                        "bravo",
                        "Staff platform reliability engineer",
                        "Define robust timeout, retry, and fallback implementations with clear ownership.",
                    ),
                    role(
                        "charlie",
                        "Incident response specialist",
                        "Improve observability and runbook readiness for rapid issue isolation and recovery.",
                    ),
                ],
            },
        ],
    },
];
