//! # Component Reference
//!
//! The OpenTelemetry building blocks that diagram nodes stand for.

use serde::{Deserialize, Serialize};

use crate::primitives::{
    DAEMONSET_AGENT, DIRECT_SDK, GATEWAY_POOL, HOST_AGENT, KAFKA_BUFFER, SAMPLING_TIER,
    SIDECAR_AGENT,
};
use crate::{NodeKind, StrataError};

/// A titled configuration example for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComponentConfig {
    pub title: &'static str,
    pub description: &'static str,
    pub yaml: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExternalLink {
    pub label: &'static str,
    pub url: &'static str,
}

/// Every section of a component's reference entry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ComponentDetail {
    pub id: ComponentId,
    pub name: &'static str,
    pub short_description: &'static str,
    pub description: &'static str,
    pub what_it_does: &'static [&'static str],
    pub when_to_use: &'static [&'static str],
    pub when_not_to_use: &'static [&'static str],
    pub configuration: &'static [ComponentConfig],
    pub related_layers: &'static [&'static str],
    pub external_links: &'static [ExternalLink],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentId {
    OtelSdk,
    AgentCollector,
    GatewayCollector,
    LoadbalancingExporter,
    TailSampling,
    Kafka,
    Backend,
}

impl ComponentId {
    pub const ALL: [ComponentId; 7] = [
        ComponentId::OtelSdk,
        ComponentId::AgentCollector,
        ComponentId::GatewayCollector,
        ComponentId::LoadbalancingExporter,
        ComponentId::TailSampling,
        ComponentId::Kafka,
        ComponentId::Backend,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentId::OtelSdk => "otel-sdk",
            ComponentId::AgentCollector => "agent-collector",
            ComponentId::GatewayCollector => "gateway-collector",
            ComponentId::LoadbalancingExporter => "loadbalancing-exporter",
            ComponentId::TailSampling => "tail-sampling",
            ComponentId::Kafka => "kafka",
            ComponentId::Backend => "backend",
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ComponentId::OtelSdk => "OpenTelemetry SDK",
            ComponentId::AgentCollector => "Agent Collector",
            ComponentId::GatewayCollector => "Gateway Collector",
            ComponentId::LoadbalancingExporter => "Load Balancing Exporter",
            ComponentId::TailSampling => "Tail Sampling Processor",
            ComponentId::Kafka => "Kafka / Message Queue",
            ComponentId::Backend => "Observability Backend",
        }
    }

    #[must_use]
    pub fn short_description(&self) -> &'static str {
        match self {
            ComponentId::OtelSdk => {
                "Client library that instruments your application to generate telemetry data."
            }
            ComponentId::AgentCollector => {
                "A collector deployed close to applications for local telemetry collection and forwarding."
            }
            ComponentId::GatewayCollector => {
                "A centralized collector pool for aggregation, processing, and multi-backend routing."
            }
            ComponentId::LoadbalancingExporter => {
                "Routes spans to collectors based on trace ID for stateful processing like tail sampling."
            }
            ComponentId::TailSampling => {
                "Makes sampling decisions after seeing the complete trace, enabling intelligent filtering."
            }
            ComponentId::Kafka => {
                "Provides durable buffering and decoupling between collection and processing tiers."
            }
            ComponentId::Backend => {
                "The destination system that stores, indexes, and visualizes your telemetry data."
            }
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ComponentId::OtelSdk => {
                "The OpenTelemetry SDK is a language-specific library that you integrate into \
                 your application code to generate traces, metrics, and logs. It provides \
                 automatic instrumentation for popular frameworks and libraries, as well as \
                 APIs for manual instrumentation when needed."
            }
            ComponentId::AgentCollector => {
                "The Agent Collector runs on the same host as your applications, typically \
                 deployed as a DaemonSet in Kubernetes or as a sidecar container. It receives \
                 telemetry from local applications, performs initial processing, and forwards \
                 data to a gateway or directly to backends. Being co-located with applications \
                 enables host-level metrics collection and resource detection."
            }
            ComponentId::GatewayCollector => {
                "The Gateway Collector is a horizontally-scalable pool of collectors that sits \
                 between agents (or applications) and observability backends. It provides \
                 centralized processing, credential management, and the ability to route \
                 telemetry to multiple destinations. Gateways are typically deployed as a \
                 Kubernetes Deployment behind a load balancer."
            }
            ComponentId::LoadbalancingExporter => {
                "The Load Balancing Exporter is a specialized exporter that routes telemetry \
                 data to downstream collectors based on consistent hashing of the trace ID. \
                 This ensures all spans belonging to the same trace are sent to the same \
                 collector instance, which is essential for stateful processing like tail \
                 sampling or span-to-metrics generation.\n\n\
                 Unlike a traditional load balancer that distributes requests randomly, the \
                 load balancing exporter uses trace-ID hashing to maintain trace affinity. \
                 This means:\n\
                 - Trace ABC always goes to Collector #2\n\
                 - Trace XYZ always goes to Collector #1\n\n\
                 This is critical because tail sampling needs to see ALL spans of a trace \
                 before making a keep/drop decision."
            }
            ComponentId::TailSampling => {
                "Tail-based sampling analyzes a complete trace before deciding whether to keep \
                 it, enabling intelligent decisions based on factors like errors, high latency, \
                 or specific attributes. This is different from head-based sampling, which \
                 makes an early decision at the start of a trace.\n\n\
                 Important: Within the OpenTelemetry Collector, any processor that generates \
                 metrics from traces must run before the tail-sampling processor. If sampling \
                 happens first, metrics will be calculated on an incomplete data set, leading \
                 to inaccurate and misleading reporting.\n\n\
                 To enforce a specific order of calculations and sampling decisions, use the \
                 Forward connector to split the traces pipeline into two steps: the first part \
                 applies calculations (like the elasticapm connector), and the second part \
                 applies the tail-based sampling decision."
            }
            ComponentId::Kafka => {
                "Apache Kafka (or similar message queues) acts as a durable buffer between the \
                 collection tier and the processing/indexing tier. This architecture provides \
                 resilience against backend outages, enables replay capabilities, and allows \
                 independent scaling of producers and consumers."
            }
            ComponentId::Backend => {
                "The observability backend is the final destination for your telemetry data. \
                 It stores traces, metrics, and logs, provides querying capabilities, and \
                 offers visualization through dashboards and explorers. Common backends \
                 include Elastic APM, Jaeger, Grafana Tempo, and cloud-native solutions."
            }
        }
    }

    /// What the component does, as short bullet points.
    #[must_use]
    pub fn duties(&self) -> &'static [&'static str] {
        match self {
            ComponentId::OtelSdk => &[
                "Automatically instruments common frameworks (HTTP, gRPC, databases)",
                "Provides APIs for manual span creation and context propagation",
                "Collects application metrics and logs",
                "Exports telemetry data via OTLP protocol",
                "Supports context propagation across service boundaries",
            ],
            ComponentId::AgentCollector => &[
                "Receives telemetry from applications on the same host",
                "Collects host metrics (CPU, memory, disk, network)",
                "Performs resource detection and enrichment",
                "Provides local buffering and retry on failures",
                "Scrapes log files from the local filesystem",
                "Adds Kubernetes metadata when running in K8s",
            ],
            ComponentId::GatewayCollector => &[
                "Centralizes telemetry processing and transformation",
                "Routes data to multiple backends (fan-out)",
                "Manages backend credentials in one place",
                "Applies consistent sampling and filtering policies",
                "Provides horizontal scaling for high-volume workloads",
                "Enables multi-tenant routing with the routing connector",
            ],
            ComponentId::LoadbalancingExporter => &[
                "Routes spans by trace ID using consistent hashing",
                "Discovers downstream collectors via DNS (headless service)",
                "Maintains trace affinity across the sampling tier",
                "Enables horizontal scaling of stateful processors",
                "Automatically rebalances when collectors scale up/down",
            ],
            ComponentId::TailSampling => &[
                "Waits for all spans of a trace before making a decision",
                "Applies policy-based sampling (latency, errors, attributes)",
                "Enables keeping 100% of error traces while sampling normal ones",
                "Supports composite policies combining multiple criteria",
                "Can generate accurate span metrics before sampling",
            ],
            ComponentId::Kafka => &[
                "Provides durable, persistent buffering of telemetry",
                "Decouples collection from processing/indexing",
                "Enables replay of historical data for reprocessing",
                "Supports multi-consumer fan-out patterns",
                "Survives extended backend outages (hours/days)",
            ],
            ComponentId::Backend => &[
                "Stores and indexes telemetry data",
                "Provides query interfaces for traces, metrics, and logs",
                "Offers visualization and dashboarding",
                "Enables alerting based on telemetry",
                "Correlates signals across traces, metrics, and logs",
            ],
        }
    }

    /// Never empty.
    #[must_use]
    pub fn when_to_use(&self) -> &'static [&'static str] {
        match self {
            ComponentId::OtelSdk => &[
                "Every application that needs observability",
                "When you want automatic instrumentation with minimal code changes",
                "When you need to add custom spans or attributes",
            ],
            ComponentId::AgentCollector => &[
                "You need host-level metrics collection",
                "You want to collect log files from disk",
                "You need resource detection from the application host",
                "You want to offload credential management from applications",
                "Running in Kubernetes and need pod/node metadata",
            ],
            ComponentId::GatewayCollector => &[
                "You need to route telemetry to multiple backends",
                "You want centralized credential management",
                "You need consistent processing policies across all telemetry",
                "You require horizontal scaling for high volumes",
                "You have multi-tenant requirements",
            ],
            ComponentId::LoadbalancingExporter => &[
                "You need tail-based sampling at scale",
                "You want to generate accurate span metrics",
                "You need service graph generation",
                "You have stateful processing requirements",
            ],
            ComponentId::TailSampling => &[
                "You want to keep all error traces regardless of sample rate",
                "You need latency-based sampling (keep slow requests)",
                "You want intelligent sampling based on trace attributes",
                "You need accurate span metrics before sampling",
            ],
            ComponentId::Kafka => &[
                "Zero data loss is a hard requirement",
                "You need to survive extended backend outages",
                "You want replay capability for reprocessing",
                "You have multiple consumers for the same data",
                "You need to decouple scaling of collection and processing",
            ],
            ComponentId::Backend => &["Always needed as the final destination for telemetry"],
        }
    }

    /// Empty for the backend, which every architecture has.
    #[must_use]
    pub fn when_not_to_use(&self) -> &'static [&'static str] {
        match self {
            ComponentId::OtelSdk => &[
                "Legacy applications that cannot be modified",
                "When using agent-based instrumentation (e.g., Java agent)",
            ],
            ComponentId::AgentCollector => &[
                "Managed container platforms where you cannot deploy agents",
                "When operational simplicity is the top priority",
                "Very resource-constrained environments",
            ],
            ComponentId::GatewayCollector => &[
                "Simple, low-volume deployments where agents suffice",
                "When minimizing latency is critical (adds a hop)",
                "When operational simplicity is the top priority",
            ],
            ComponentId::LoadbalancingExporter => &[
                "Simple probabilistic (head) sampling is sufficient",
                "You want to minimize operational complexity",
                "Low-volume scenarios where a single collector suffices",
            ],
            ComponentId::TailSampling => &[
                "Simple probabilistic sampling is sufficient",
                "You cannot tolerate the added latency of waiting for traces",
                "Operational complexity is a concern",
                "Low-volume scenarios where you can keep all traces",
            ],
            ComponentId::Kafka => &[
                "You don't have Kafka expertise on the team",
                "Low-latency requirements (queuing adds latency)",
                "Simple deployments where complexity isn't justified",
                "Cost-sensitive environments",
            ],
            ComponentId::Backend => &[],
        }
    }

    /// Titled configuration examples. The SDK and the backend have none.
    #[must_use]
    pub fn configuration(&self) -> &'static [ComponentConfig] {
        match self {
            ComponentId::OtelSdk | ComponentId::Backend => &[],
            ComponentId::AgentCollector => &[
                ComponentConfig {
                    title: "Basic Agent Configuration",
                    description: "A minimal agent collector configuration that receives OTLP \
                                  and forwards to a gateway.",
                    yaml: AGENT_BASIC,
                },
                ComponentConfig {
                    title: "Kubernetes DaemonSet Deployment",
                    description: "Deploy the agent as a DaemonSet to run on every node.",
                    yaml: AGENT_DAEMONSET,
                },
            ],
            ComponentId::GatewayCollector => &[
                ComponentConfig {
                    title: "Gateway with Multi-Backend Routing",
                    description: "A gateway that routes telemetry to multiple observability \
                                  backends.",
                    yaml: GATEWAY_MULTI_BACKEND,
                },
                ComponentConfig {
                    title: "Kubernetes Deployment with HPA",
                    description: "Deploy the gateway as a scalable Deployment with Horizontal \
                                  Pod Autoscaler.",
                    yaml: GATEWAY_HPA,
                },
            ],
            ComponentId::LoadbalancingExporter => &[
                ComponentConfig {
                    title: "Load Balancing Exporter Configuration",
                    description: "Configure the load balancing exporter to route by trace ID \
                                  to a headless service.",
                    yaml: LB_EXPORTER,
                },
                ComponentConfig {
                    title: "Headless Service for Collector Discovery",
                    description: "Create a headless service so the load balancing exporter \
                                  can discover all collector pods.",
                    yaml: LB_HEADLESS_SERVICE,
                },
            ],
            ComponentId::TailSampling => &[
                ComponentConfig {
                    title: "Two-Step Pipeline with Forward Connector",
                    description: "Required configuration to ensure metrics are calculated \
                                  before sampling. The elasticapm connector must run before \
                                  tail_sampling.",
                    yaml: SAMPLING_TWO_STEP,
                },
                ComponentConfig {
                    title: "Load-Balancing Collector (Upstream)",
                    description: "The upstream collector that routes traces by ID to the \
                                  sampling tier.",
                    yaml: LB_EXPORTER,
                },
                ComponentConfig {
                    title: "Complete Tail Sampling Architecture",
                    description: "Full downstream collector configuration with two-step \
                                  pipeline for accurate metrics and sampling.",
                    yaml: SAMPLING_COMPLETE,
                },
            ],
            ComponentId::Kafka => &[
                ComponentConfig {
                    title: "Kafka Exporter Configuration",
                    description: "Configure the collector to export telemetry to Kafka topics.",
                    yaml: KAFKA_EXPORTER,
                },
                ComponentConfig {
                    title: "Kafka Receiver Configuration",
                    description: "Configure the collector to consume telemetry from Kafka \
                                  topics.",
                    yaml: KAFKA_RECEIVER,
                },
            ],
        }
    }

    /// Built-in catalog layers that deploy the component.
    #[must_use]
    pub fn related_layers(&self) -> &'static [&'static str] {
        match self {
            ComponentId::OtelSdk => &[DIRECT_SDK, DAEMONSET_AGENT, SIDECAR_AGENT, HOST_AGENT],
            ComponentId::AgentCollector => &[DAEMONSET_AGENT, SIDECAR_AGENT, HOST_AGENT],
            ComponentId::GatewayCollector => &[GATEWAY_POOL],
            ComponentId::LoadbalancingExporter | ComponentId::TailSampling => &[SAMPLING_TIER],
            ComponentId::Kafka => &[KAFKA_BUFFER],
            ComponentId::Backend => &[DIRECT_SDK, GATEWAY_POOL, SAMPLING_TIER],
        }
    }

    #[must_use]
    pub fn external_links(&self) -> &'static [ExternalLink] {
        match self {
            ComponentId::OtelSdk => &[ExternalLink {
                label: "OpenTelemetry SDK Documentation",
                url: "https://opentelemetry.io/docs/instrumentation/",
            }],
            ComponentId::AgentCollector => &[
                ExternalLink {
                    label: "Collector Deployment Modes",
                    url: "https://opentelemetry.io/docs/collector/deployment/",
                },
                ExternalLink {
                    label: "Host Metrics Receiver",
                    url: "https://github.com/open-telemetry/opentelemetry-collector-contrib/tree/main/receiver/hostmetricsreceiver",
                },
            ],
            ComponentId::GatewayCollector => &[
                ExternalLink {
                    label: "Collector Scaling",
                    url: "https://opentelemetry.io/docs/collector/scaling/",
                },
                ExternalLink {
                    label: "Routing Connector",
                    url: "https://github.com/open-telemetry/opentelemetry-collector-contrib/tree/main/connector/routingconnector",
                },
            ],
            ComponentId::LoadbalancingExporter => &[ExternalLink {
                label: "Load Balancing Exporter",
                url: "https://github.com/open-telemetry/opentelemetry-collector-contrib/tree/main/exporter/loadbalancingexporter",
            }],
            ComponentId::TailSampling => &[
                ExternalLink {
                    label: "Tail Sampling Processor",
                    url: "https://github.com/open-telemetry/opentelemetry-collector-contrib/tree/main/processor/tailsamplingprocessor",
                },
                ExternalLink {
                    label: "Elastic Tail Sampling Guide",
                    url: "https://www.elastic.co/docs/reference/edot-collector/config/tail-based-sampling",
                },
                ExternalLink {
                    label: "Forward Connector",
                    url: "https://github.com/open-telemetry/opentelemetry-collector-contrib/tree/main/connector/forwardconnector",
                },
            ],
            ComponentId::Kafka => &[
                ExternalLink {
                    label: "Kafka Exporter",
                    url: "https://github.com/open-telemetry/opentelemetry-collector-contrib/tree/main/exporter/kafkaexporter",
                },
                ExternalLink {
                    label: "Kafka Receiver",
                    url: "https://github.com/open-telemetry/opentelemetry-collector-contrib/tree/main/receiver/kafkareceiver",
                },
            ],
            ComponentId::Backend => &[
                ExternalLink {
                    label: "Elastic APM",
                    url: "https://www.elastic.co/observability/application-performance-monitoring",
                },
                ExternalLink {
                    label: "Jaeger",
                    url: "https://www.jaegertracing.io/",
                },
                ExternalLink {
                    label: "Grafana Tempo",
                    url: "https://grafana.com/oss/tempo/",
                },
            ],
        }
    }

    #[must_use]
    pub fn detail(self) -> ComponentDetail {
        ComponentDetail {
            id: self,
            name: self.name(),
            short_description: self.short_description(),
            description: self.description(),
            what_it_does: self.duties(),
            when_to_use: self.when_to_use(),
            when_not_to_use: self.when_not_to_use(),
            configuration: self.configuration(),
            related_layers: self.related_layers(),
            external_links: self.external_links(),
        }
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComponentId {
    type Err = StrataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentId::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| StrataError::SerializationError(format!("unknown component '{}'", s)))
    }
}

/// The component a diagram node kind stands for.
///
/// Sidecar nodes have no dedicated entry.
#[must_use]
pub fn component_for_node(kind: NodeKind) -> Option<ComponentId> {
    match kind {
        NodeKind::App => Some(ComponentId::OtelSdk),
        NodeKind::Agent => Some(ComponentId::AgentCollector),
        NodeKind::Gateway => Some(ComponentId::GatewayCollector),
        NodeKind::LoadBalancer => Some(ComponentId::LoadbalancingExporter),
        NodeKind::Kafka => Some(ComponentId::Kafka),
        NodeKind::Backend => Some(ComponentId::Backend),
        NodeKind::Sidecar => None,
    }
}

// =============================================================================
// CONFIG EXAMPLES
// =============================================================================

const AGENT_BASIC: &str = r#"receivers:
  otlp:
    protocols:
      grpc:
        endpoint: 0.0.0.0:4317
      http:
        endpoint: 0.0.0.0:4318
  hostmetrics:
    collection_interval: 30s
    scrapers:
      cpu:
      memory:
      disk:
      network:

processors:
  batch:
    timeout: 1s
    send_batch_size: 1024
  resourcedetection:
    detectors: [env, system, docker, ec2, gcp, azure]
  memory_limiter:
    check_interval: 1s
    limit_mib: 512

exporters:
  otlp:
    endpoint: gateway-collector:4317
    tls:
      insecure: true

service:
  pipelines:
    traces:
      receivers: [otlp]
      processors: [memory_limiter, resourcedetection, batch]
      exporters: [otlp]
    metrics:
      receivers: [otlp, hostmetrics]
      processors: [memory_limiter, resourcedetection, batch]
      exporters: [otlp]
    logs:
      receivers: [otlp]
      processors: [memory_limiter, resourcedetection, batch]
      exporters: [otlp]"#;

const AGENT_DAEMONSET: &str = r#"apiVersion: apps/v1
kind: DaemonSet
metadata:
  name: otel-agent
  namespace: observability
spec:
  selector:
    matchLabels:
      app: otel-agent
  template:
    metadata:
      labels:
        app: otel-agent
    spec:
      containers:
        - name: otel-agent
          image: otel/opentelemetry-collector-contrib:latest
          args: ["--config=/etc/otel/config.yaml"]
          ports:
            - containerPort: 4317
              hostPort: 4317
            - containerPort: 4318
              hostPort: 4318
          volumeMounts:
            - name: config
              mountPath: /etc/otel
          resources:
            limits:
              memory: 512Mi
            requests:
              memory: 256Mi
      volumes:
        - name: config
          configMap:
            name: otel-agent-config"#;

const GATEWAY_MULTI_BACKEND: &str = r#"receivers:
  otlp:
    protocols:
      grpc:
        endpoint: 0.0.0.0:4317
      http:
        endpoint: 0.0.0.0:4318

processors:
  batch:
    timeout: 5s
    send_batch_size: 8192
  memory_limiter:
    check_interval: 1s
    limit_mib: 2048
  filter/drop-health:
    spans:
      exclude:
        match_type: strict
        span_names: ["health", "healthcheck", "ping"]

exporters:
  otlp/elastic:
    endpoint: https://your-elastic-endpoint:443
    headers:
      Authorization: "ApiKey your-api-key"
  otlp/jaeger:
    endpoint: jaeger-collector:4317
    tls:
      insecure: true
  prometheus:
    endpoint: 0.0.0.0:8889

service:
  pipelines:
    traces:
      receivers: [otlp]
      processors: [memory_limiter, filter/drop-health, batch]
      exporters: [otlp/elastic, otlp/jaeger]
    metrics:
      receivers: [otlp]
      processors: [memory_limiter, batch]
      exporters: [otlp/elastic, prometheus]
    logs:
      receivers: [otlp]
      processors: [memory_limiter, batch]
      exporters: [otlp/elastic]"#;

const GATEWAY_HPA: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: otel-gateway
  namespace: observability
spec:
  replicas: 3
  selector:
    matchLabels:
      app: otel-gateway
  template:
    metadata:
      labels:
        app: otel-gateway
    spec:
      containers:
        - name: otel-gateway
          image: otel/opentelemetry-collector-contrib:latest
          args: ["--config=/etc/otel/config.yaml"]
          ports:
            - containerPort: 4317
            - containerPort: 4318
          resources:
            limits:
              memory: 2Gi
            requests:
              memory: 1Gi
---
apiVersion: autoscaling/v2
kind: HorizontalPodAutoscaler
metadata:
  name: otel-gateway-hpa
  namespace: observability
spec:
  scaleTargetRef:
    apiVersion: apps/v1
    kind: Deployment
    name: otel-gateway
  minReplicas: 3
  maxReplicas: 10
  metrics:
    - type: Resource
      resource:
        name: memory
        target:
          type: Utilization
          averageUtilization: 80"#;

const LB_EXPORTER: &str = r#"exporters:
  loadbalancing:
    routing_key: traceID
    protocol:
      otlp:
        tls:
          insecure: true
    resolver:
      dns:
        hostname: otel-sampling-headless.observability.svc.cluster.local
        port: 4317

service:
  pipelines:
    traces:
      receivers: [otlp]
      processors: [batch]
      exporters: [loadbalancing]"#;

const LB_HEADLESS_SERVICE: &str = r#"apiVersion: v1
kind: Service
metadata:
  name: otel-sampling-headless
  namespace: observability
spec:
  clusterIP: None  # Headless service
  selector:
    app: otel-sampling
  ports:
    - port: 4317
      targetPort: 4317
      name: otlp-grpc"#;

const SAMPLING_TWO_STEP: &str = r#"connectors:
  elasticapm: {}
  forward: {}

processors:
  tail_sampling:
    decision_wait: 10s
    num_traces: 100
    expected_new_traces_per_sec: 10
    policies:
      - name: errors-policy
        type: status_code
        status_code:
          status_codes: [ERROR]
      - name: latency-policy
        type: latency
        latency:
          threshold_ms: 5000
          upper_threshold_ms: 10000
      - name: probabilistic-policy
        type: probabilistic
        probabilistic:
          sampling_percentage: 10

service:
  pipelines:
    traces/1-process-elastic:
      receivers: [otlp]
      processors: [batch]
      exporters: [elasticapm, forward]
    traces/2-tail-sampling:
      receivers: [forward]
      processors: [tail_sampling]
      exporters: [otlp/backend]"#;

const SAMPLING_COMPLETE: &str = r#"# Downstream Tail-Sampling Collector
connectors:
  elasticapm: {}
  forward: {}

processors:
  tail_sampling:
    decision_wait: 10s
    num_traces: 100
    expected_new_traces_per_sec: 10
    policies:
      - name: latency-5000ms-10000ms
        type: latency
        latency:
          threshold_ms: 5000
          upper_threshold_ms: 10000
      - name: error-traces
        type: status_code
        status_code:
          status_codes: [ERROR]
      - name: default-sampling
        type: probabilistic
        probabilistic:
          sampling_percentage: 5

exporters:
  otlp/backend:
    endpoint: https://your-backend:443
    headers:
      Authorization: "Bearer token"

service:
  pipelines:
    # Step 1: Process with elasticapm for metrics
    traces/1-process-elastic:
      receivers: [otlp]
      processors: []
      exporters: [elasticapm, forward]
    # Step 2: Apply tail sampling
    traces/2-process-tbs:
      receivers: [forward]
      processors: [tail_sampling]
      exporters: [otlp/backend]"#;

const KAFKA_EXPORTER: &str = r#"exporters:
  kafka:
    brokers:
      - kafka-broker-1:9092
      - kafka-broker-2:9092
    topic: otel-traces
    encoding: otlp_proto
    producer:
      max_message_bytes: 1000000
      required_acks: -1  # Wait for all replicas

service:
  pipelines:
    traces:
      receivers: [otlp]
      processors: [batch]
      exporters: [kafka]"#;

const KAFKA_RECEIVER: &str = r#"receivers:
  kafka:
    brokers:
      - kafka-broker-1:9092
      - kafka-broker-2:9092
    topic: otel-traces
    encoding: otlp_proto
    group_id: otel-gateway-consumer

service:
  pipelines:
    traces:
      receivers: [kafka]
      processors: [batch]
      exporters: [otlp/backend]"#;

// =============================================================================
// TESTS
// =============================================================================
