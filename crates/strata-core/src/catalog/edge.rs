//! Edge layers: how telemetry enters the pipeline.

use crate::primitives::{DAEMONSET_AGENT, DIRECT_SDK, HOST_AGENT, SIDECAR_AGENT};
use crate::{Layer, LayerType, NodeKind, SnippetKind};

pub(super) fn layers() -> Vec<Layer> {
    vec![direct_sdk(), daemonset_agent(), sidecar_agent(), host_agent()]
}

fn direct_sdk() -> Layer {
    Layer::new(DIRECT_SDK, LayerType::Edge, "Direct SDK Export")
        .describe(
            "Applications export telemetry directly to the next tier (gateway or backend). \
             No local collector.",
            "Zap",
        )
        .node("app", NodeKind::App, "Application\n+ OTel SDK")
        .snippet(SnippetKind::Agent, DIRECT_SDK_AGENT)
}

fn daemonset_agent() -> Layer {
    Layer::new(DAEMONSET_AGENT, LayerType::Edge, "DaemonSet Agent")
        .describe(
            "One collector per Kubernetes node. Collects host metrics, enriches with k8s \
             metadata. Apps export to localhost.",
            "Server",
        )
        .requiring(&["kubernetes", "daemonset-capable"])
        .providing(&[
            "host-metrics",
            "resource-detection",
            "k8s-metadata",
            "log-collection",
        ])
        .incompatible(&["managed-containers"])
        .node("app", NodeKind::App, "Application")
        .node("daemonset", NodeKind::Agent, "DaemonSet\nAgent")
        .edge("app", "daemonset", Some("localhost"))
        .snippet(SnippetKind::Agent, DAEMONSET_AGENT_CONFIG)
        .snippet(SnippetKind::Deployment, DAEMONSET_MANIFEST)
        .sized("250m-500m", "256Mi-512Mi", None)
}

fn sidecar_agent() -> Layer {
    Layer::new(SIDECAR_AGENT, LayerType::Edge, "Sidecar Agent")
        .describe(
            "One collector per pod. Provides per-service isolation and custom config. \
             Works on managed container platforms.",
            "Box",
        )
        .requiring(&["kubernetes"])
        .providing(&["per-service-isolation", "custom-per-service-config"])
        .node("app", NodeKind::App, "Application")
        .node("sidecar", NodeKind::Sidecar, "Sidecar\nAgent")
        .edge("app", "sidecar", Some("localhost"))
        .snippet(SnippetKind::Agent, SIDECAR_AGENT_CONFIG)
        .snippet(SnippetKind::Deployment, SIDECAR_MANIFEST)
        .sized("50m-100m", "64Mi-128Mi", None)
}

fn host_agent() -> Layer {
    Layer::new(HOST_AGENT, LayerType::Edge, "Host Agent")
        .describe(
            "Standalone collector running on a bare-metal host or VM. Collects host metrics \
             and local application telemetry.",
            "Server",
        )
        .providing(&["host-metrics", "resource-detection", "log-collection"])
        .node("app", NodeKind::App, "Application")
        .node("host-agent", NodeKind::Agent, "Host\nAgent")
        .edge("app", "host-agent", Some("localhost"))
        .snippet(SnippetKind::Agent, HOST_AGENT_CONFIG)
        .snippet(SnippetKind::Deployment, HOST_AGENT_SYSTEMD)
        .sized("250m-500m", "256Mi-512Mi", None)
}

// =============================================================================
// CONFIG SNIPPETS
// =============================================================================

const DIRECT_SDK_AGENT: &str = r#"# SDK Configuration (environment variables)
# Point directly to gateway or backend
OTEL_EXPORTER_OTLP_ENDPOINT=http://otel-gateway:4317
OTEL_SERVICE_NAME=my-service
OTEL_RESOURCE_ATTRIBUTES=deployment.environment=production"#;

const DAEMONSET_AGENT_CONFIG: &str = r#"# DaemonSet Agent Configuration
receivers:
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
  filelog:
    include: [/var/log/containers/*.log]
    operators:
      - type: container
        id: container-parser

processors:
  memory_limiter:
    check_interval: 1s
    limit_mib: 512
    spike_limit_mib: 128
  resourcedetection:
    detectors: [env, system, gcp, aws, azure]
  k8sattributes:
    auth_type: serviceAccount
    passthrough: false
    filter:
      node_from_env_var: KUBE_NODE_NAME
    extract:
      metadata:
        - k8s.namespace.name
        - k8s.deployment.name
        - k8s.pod.name
        - k8s.node.name
  batch:
    send_batch_size: 1024
    timeout: 5s

exporters:
  otlp:
    endpoint: otel-gateway.observability.svc:4317
    tls:
      insecure: true

service:
  pipelines:
    traces:
      receivers: [otlp]
      processors: [memory_limiter, resourcedetection, k8sattributes, batch]
      exporters: [otlp]
    metrics:
      receivers: [otlp, hostmetrics]
      processors: [memory_limiter, resourcedetection, k8sattributes, batch]
      exporters: [otlp]
    logs:
      receivers: [otlp, filelog]
      processors: [memory_limiter, resourcedetection, k8sattributes, batch]
      exporters: [otlp]"#;

const DAEMONSET_MANIFEST: &str = r#"# DaemonSet for Agent Collector
apiVersion: apps/v1
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
      serviceAccountName: otel-collector
      containers:
        - name: collector
          image: otel/opentelemetry-collector-contrib:latest
          args: ["--config=/conf/config.yaml"]
          env:
            - name: GOMEMLIMIT
              value: "400MiB"
            - name: KUBE_NODE_NAME
              valueFrom:
                fieldRef:
                  fieldPath: spec.nodeName
          ports:
            - containerPort: 4317
              hostPort: 4317
              name: otlp-grpc
            - containerPort: 4318
              hostPort: 4318
              name: otlp-http
          resources:
            requests:
              memory: 256Mi
              cpu: 250m
            limits:
              memory: 512Mi
              cpu: 500m
          volumeMounts:
            - name: config
              mountPath: /conf
            - name: varlog
              mountPath: /var/log
              readOnly: true
      volumes:
        - name: config
          configMap:
            name: otel-agent-config
        - name: varlog
          hostPath:
            path: /var/log"#;

const SIDECAR_AGENT_CONFIG: &str = r#"# Sidecar Agent Configuration
# Lightweight config - no host metrics (can't access node)
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
    limit_mib: 128
    spike_limit_mib: 32
  batch:
    send_batch_size: 512
    timeout: 5s

exporters:
  otlp:
    endpoint: otel-gateway.observability.svc:4317
    tls:
      insecure: true

service:
  pipelines:
    traces:
      receivers: [otlp]
      processors: [memory_limiter, batch]
      exporters: [otlp]
    metrics:
      receivers: [otlp]
      processors: [memory_limiter, batch]
      exporters: [otlp]
    logs:
      receivers: [otlp]
      processors: [memory_limiter, batch]
      exporters: [otlp]"#;

const SIDECAR_MANIFEST: &str = r#"# Sidecar injection via OpenTelemetry Operator
# Add annotation to enable sidecar injection:
apiVersion: v1
kind: Pod
metadata:
  annotations:
    sidecar.opentelemetry.io/inject: "true"
    instrumentation.opentelemetry.io/inject-java: "true"
spec:
  containers:
    - name: my-app
      image: my-app:latest
      # Sidecar will be injected automatically
---
# OpenTelemetryCollector CR for sidecar mode
apiVersion: opentelemetry.io/v1beta1
kind: OpenTelemetryCollector
metadata:
  name: sidecar
  namespace: observability
spec:
  mode: sidecar
  config:
    receivers:
      otlp:
        protocols:
          grpc:
            endpoint: 0.0.0.0:4317
    processors:
      memory_limiter:
        limit_mib: 128
      batch:
        send_batch_size: 512
    exporters:
      otlp:
        endpoint: otel-gateway.observability.svc:4317
    service:
      pipelines:
        traces:
          receivers: [otlp]
          processors: [memory_limiter, batch]
          exporters: [otlp]"#;

const HOST_AGENT_CONFIG: &str = r#"# Host Agent Configuration (systemd / standalone)
receivers:
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
      filesystem:
      load:
  filelog:
    include: [/var/log/syslog, /var/log/*.log]
    operators:
      - type: regex_parser
        regex: '^(?P<time>\S+) (?P<host>\S+) (?P<ident>\S+): (?P<message>.*)$'
        timestamp:
          parse_from: attributes.time
          layout_type: gotime
          layout: '2006-01-02T15:04:05.000Z'

processors:
  memory_limiter:
    check_interval: 1s
    limit_mib: 512
    spike_limit_mib: 128
  resourcedetection:
    detectors: [env, system, gcp, aws, azure]
  batch:
    send_batch_size: 1024
    timeout: 5s

exporters:
  otlp:
    endpoint: otel-gateway:4317
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
      receivers: [otlp, filelog]
      processors: [memory_limiter, resourcedetection, batch]
      exporters: [otlp]"#;

const HOST_AGENT_SYSTEMD: &str = r#"# Install via package manager or download binary
# Debian/Ubuntu:
#   sudo apt-get install otelcol-contrib
#
# Or download from GitHub releases:
#   https://github.com/open-telemetry/opentelemetry-collector-releases
#
# systemd service file:
# /etc/systemd/system/otelcol.service
[Unit]
Description=OpenTelemetry Collector
After=network.target

[Service]
ExecStart=/usr/bin/otelcol-contrib --config /etc/otelcol/config.yaml
Restart=always
RestartSec=5
User=otelcol
Group=otelcol
Environment=GOMEMLIMIT=400MiB
LimitNOFILE=65536

[Install]
WantedBy=multi-user.target"#;
