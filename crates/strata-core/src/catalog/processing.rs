//! Processing layers: central processing, routing, and sampling.

use crate::primitives::{GATEWAY_POOL, NO_PROCESSING, SAMPLING_TIER};
use crate::{Layer, LayerType, NodeKind, SnippetKind};

pub(super) fn layers() -> Vec<Layer> {
    vec![no_processing(), gateway_pool(), sampling_tier()]
}

/// Listed so it can be displayed as an option; never part of a composed diagram.
fn no_processing() -> Layer {
    Layer::new(NO_PROCESSING, LayerType::Processing, "No Central Processing")
        .describe(
            "Edge collectors export directly to backend. Simplest setup but no centralized policy.",
            "MinusCircle",
        )
        .incompatible(&["tail-sampling", "multi-backend", "central-policy"])
}

fn gateway_pool() -> Layer {
    Layer::new(GATEWAY_POOL, LayerType::Processing, "Gateway Pool")
        .describe(
            "Centralized collector deployment for policy enforcement, multi-backend routing, \
             and credential isolation. Replica count scales with data volume.",
            "Layers",
        )
        .providing(&[
            "central-policy",
            "multi-backend",
            "credential-isolation",
            "pii-filtering",
        ])
        .node("lb", NodeKind::LoadBalancer, "Load\nBalancer")
        .node("gateway", NodeKind::Gateway, "Gateway\nPool")
        .edge("lb", "gateway", None)
        .snippet(SnippetKind::Gateway, GATEWAY_CONFIG)
        .snippet(SnippetKind::Deployment, GATEWAY_MANIFEST)
        .sized("1-2 cores", "2Gi-4Gi", None)
}

fn sampling_tier() -> Layer {
    Layer::new(SAMPLING_TIER, LayerType::Processing, "Tail Sampling Tier")
        .describe(
            "StatefulSet with loadbalancingexporter for trace-aware sampling. \
             All spans of a trace reach the same collector.",
            "GitBranch",
        )
        .requiring(&[GATEWAY_POOL])
        .providing(&["tail-sampling", "span-metrics", "service-graph"])
        .node("lb-exporter", NodeKind::LoadBalancer, "LB\nExporter")
        .node("sampling", NodeKind::Gateway, "Sampling\nTier")
        .edge("lb-exporter", "sampling", Some("traceID\nhash"))
        .snippet(SnippetKind::Agent, SAMPLING_AGENT_EXPORTER)
        .snippet(SnippetKind::Gateway, SAMPLING_CONFIG)
        .snippet(SnippetKind::Deployment, SAMPLING_MANIFEST)
        .sized("2-4 cores", "4Gi-8Gi", Some(3))
}

// =============================================================================
// CONFIG SNIPPETS
// =============================================================================

const GATEWAY_CONFIG: &str = r#"# Gateway Pool Configuration
receivers:
  otlp:
    protocols:
      grpc:
        endpoint: 0.0.0.0:4317
      http:
        endpoint: 0.0.0.0:4318

processors:
  memory_limiter:
    check_interval: 1s
    limit_mib: 2048
    spike_limit_mib: 512
  filter:
    error_mode: ignore
    traces:
      span:
        - 'attributes["http.route"] == "/health"'
        - 'attributes["http.route"] == "/ready"'
  transform:
    error_mode: ignore
    trace_statements:
      - context: span
        statements:
          - delete_key(attributes, "http.request.header.authorization")
  batch:
    send_batch_size: 2048
    timeout: 10s

exporters:
  otlp/backend:
    endpoint: ${BACKEND_ENDPOINT}
    headers:
      Authorization: Bearer ${BACKEND_TOKEN}
    sending_queue:
      enabled: true
      queue_size: 10000
    retry_on_failure:
      enabled: true
      max_elapsed_time: 300s

service:
  pipelines:
    traces:
      receivers: [otlp]
      processors: [memory_limiter, filter, transform, batch]
      exporters: [otlp/backend]
    metrics:
      receivers: [otlp]
      processors: [memory_limiter, batch]
      exporters: [otlp/backend]
    logs:
      receivers: [otlp]
      processors: [memory_limiter, filter, batch]
      exporters: [otlp/backend]"#;

const GATEWAY_MANIFEST: &str = r#"# Gateway Deployment with HPA
apiVersion: apps/v1
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
      affinity:
        podAntiAffinity:
          preferredDuringSchedulingIgnoredDuringExecution:
            - weight: 100
              podAffinityTerm:
                labelSelector:
                  matchLabels:
                    app: otel-gateway
                topologyKey: kubernetes.io/hostname
      containers:
        - name: collector
          image: otel/opentelemetry-collector-contrib:latest
          args: ["--config=/conf/config.yaml"]
          env:
            - name: GOMEMLIMIT
              value: "3200MiB"
          ports:
            - containerPort: 4317
            - containerPort: 4318
          resources:
            requests:
              memory: 2Gi
              cpu: 1000m
            limits:
              memory: 4Gi
              cpu: 2000m
---
apiVersion: v1
kind: Service
metadata:
  name: otel-gateway
  namespace: observability
spec:
  selector:
    app: otel-gateway
  ports:
    - port: 4317
      name: otlp-grpc
    - port: 4318
      name: otlp-http
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
        name: cpu
        target:
          type: Utilization
          averageUtilization: 60
    - type: Resource
      resource:
        name: memory
        target:
          type: Utilization
          averageUtilization: 70
  behavior:
    scaleDown:
      stabilizationWindowSeconds: 300"#;

const SAMPLING_AGENT_EXPORTER: &str = r#"# Add to agent config - Load Balancing Exporter
exporters:
  loadbalancing:
    routing_key: traceID
    protocol:
      otlp:
        tls:
          insecure: true
    resolver:
      dns:
        hostname: otel-sampling.observability.svc.cluster.local
        port: 4317"#;

const SAMPLING_CONFIG: &str = r#"# Sampling Tier Configuration
receivers:
  otlp:
    protocols:
      grpc:
        endpoint: 0.0.0.0:4317

processors:
  memory_limiter:
    check_interval: 1s
    limit_mib: 4096
    spike_limit_mib: 1024
  tail_sampling:
    decision_wait: 30s
    num_traces: 100000
    expected_new_traces_per_sec: 10000
    policies:
      - name: errors-policy
        type: status_code
        status_code:
          status_codes: [ERROR]
      - name: slow-traces
        type: latency
        latency:
          threshold_ms: 1000
      - name: probabilistic-sample
        type: probabilistic
        probabilistic:
          sampling_percentage: 10

connectors:
  spanmetrics:
    histogram:
      explicit:
        buckets: [5ms, 10ms, 25ms, 50ms, 100ms, 250ms, 500ms, 1s, 2.5s, 5s, 10s]
    dimensions:
      - name: http.method
      - name: http.status_code
    exemplars:
      enabled: true

exporters:
  otlp/traces:
    endpoint: backend.example.com:4317
  prometheusremotewrite:
    endpoint: https://prometheus.example.com/api/v1/write

service:
  pipelines:
    traces:
      receivers: [otlp]
      processors: [memory_limiter, tail_sampling]
      exporters: [spanmetrics, otlp/traces]
    metrics:
      receivers: [spanmetrics]
      exporters: [prometheusremotewrite]"#;

const SAMPLING_MANIFEST: &str = r#"# StatefulSet for Sampling Tier
apiVersion: v1
kind: Service
metadata:
  name: otel-sampling
  namespace: observability
spec:
  clusterIP: None  # Headless for DNS discovery
  selector:
    app: otel-sampling
  ports:
    - port: 4317
      name: otlp-grpc
---
apiVersion: apps/v1
kind: StatefulSet
metadata:
  name: otel-sampling
  namespace: observability
spec:
  serviceName: otel-sampling
  replicas: 3
  selector:
    matchLabels:
      app: otel-sampling
  template:
    metadata:
      labels:
        app: otel-sampling
    spec:
      containers:
        - name: collector
          image: otel/opentelemetry-collector-contrib:latest
          args: ["--config=/conf/config.yaml"]
          env:
            - name: GOMEMLIMIT
              value: "6400MiB"
          ports:
            - containerPort: 4317
          resources:
            requests:
              memory: 4Gi
              cpu: 2000m
            limits:
              memory: 8Gi
              cpu: 4000m"#;
