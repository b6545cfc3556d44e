//! Legal topic categories the chat is scoped to.
//!
//! Per-category differences (names, colors, example prompts) are plain data
//! here; the session and formatter are shared across all four.

use std::fmt;
use std::str::FromStr;

/// Errors produced when parsing a category slug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryError {
    #[error("unknown category '{0}' (expected labor, housing, consumer or traffic)")]
    Unknown(String),
}

/// One of the four fixed legal topic areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Labor,
    Housing,
    Consumer,
    Traffic,
}

/// A canned question offered on the welcome panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamplePrompt {
    pub label: &'static str,
    pub question: &'static str,
}

impl Category {
    pub const ALL: [Category; 4] = [Self::Labor, Self::Housing, Self::Consumer, Self::Traffic];

    /// Category used when the query parameter is absent.
    pub const DEFAULT: Category = Self::Labor;

    /// Parse the `?category=` query value. A missing value falls back to
    /// [`Category::DEFAULT`]; an unknown one is an error.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryError::Unknown`] for unrecognized slugs.
    pub fn from_query(raw: Option<&str>) -> Result<Self, CategoryError> {
        match raw {
            None | Some("") => Ok(Self::DEFAULT),
            Some(slug) => slug.parse(),
        }
    }

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Labor => "labor",
            Self::Housing => "housing",
            Self::Consumer => "consumer",
            Self::Traffic => "traffic",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Labor => "노동법",
            Self::Housing => "임대차법",
            Self::Consumer => "소비자보호법",
            Self::Traffic => "교통사고",
        }
    }

    /// Lucide icon identifier.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Labor => "briefcase",
            Self::Housing => "home",
            Self::Consumer => "shield-check",
            Self::Traffic => "car",
        }
    }

    /// Accent color as a `#rrggbb` hex string.
    #[must_use]
    pub fn accent_color(self) -> &'static str {
        match self {
            Self::Labor => "#3b82f6",
            Self::Housing => "#10b981",
            Self::Consumer => "#f59e0b",
            Self::Traffic => "#ef4444",
        }
    }

    #[must_use]
    pub fn intro_message(self) -> &'static str {
        match self {
            Self::Labor => {
                "노동법 분야 상담을 시작합니다. 근로기준법, 최저임금법, 퇴직급여보장법 등을 기반으로 답변드립니다."
            }
            Self::Housing => {
                "임대차법 분야 상담을 시작합니다. 주택임대차보호법, 상가건물임대차보호법을 기반으로 답변드립니다."
            }
            Self::Consumer => "소비자보호법 분야 상담을 시작합니다. 소비자기본법, 전자상거래법을 기반으로 답변드립니다.",
            Self::Traffic => {
                "교통사고·손해배상 분야 상담을 시작합니다. 자동차손해배상보장법, 도로교통법을 기반으로 답변드립니다."
            }
        }
    }

    /// Short topic summary shown in the category picker.
    #[must_use]
    pub fn summary(self) -> &'static str {
        match self {
            Self::Labor => "해고, 임금, 퇴직금",
            Self::Housing => "보증금, 계약갱신",
            Self::Consumer => "환불, 청약철회",
            Self::Traffic => "손해배상, 보험",
        }
    }

    #[must_use]
    pub fn examples(self) -> &'static [ExamplePrompt] {
        match self {
            Self::Labor => &[
                ExamplePrompt { label: "퇴직금 계산", question: "퇴직금은 어떻게 계산하나요?" },
                ExamplePrompt { label: "부당해고 대응", question: "부당해고를 당했을 때 어떻게 해야 하나요?" },
                ExamplePrompt { label: "임금체불", question: "임금을 받지 못했을 때 어떻게 해야 하나요?" },
            ],
            Self::Housing => &[
                ExamplePrompt {
                    label: "보증금 반환",
                    question: "전세보증금을 돌려받지 못하면 어떻게 해야 하나요?",
                },
                ExamplePrompt { label: "계약갱신", question: "임대차 계약갱신청구권이 무엇인가요?" },
                ExamplePrompt { label: "대항력", question: "임차인의 대항력은 어떻게 갖추나요?" },
            ],
            Self::Consumer => &[
                ExamplePrompt { label: "온라인 환불", question: "온라인 쇼핑 환불 규정이 어떻게 되나요?" },
                ExamplePrompt { label: "청약철회", question: "청약철회는 어떤 경우에 가능한가요?" },
                ExamplePrompt { label: "제품 하자", question: "제품에 하자가 있을 때 어떻게 보상받나요?" },
            ],
            Self::Traffic => &[
                ExamplePrompt { label: "과실비율", question: "교통사고 과실비율은 어떻게 정해지나요?" },
                ExamplePrompt { label: "손해배상", question: "교통사고 손해배상은 어떻게 청구하나요?" },
                ExamplePrompt { label: "보험금 청구", question: "자동차 보험금 청구 절차가 어떻게 되나요?" },
            ],
        }
    }

    /// Prefix the user's text with the category tag the API expects.
    #[must_use]
    pub fn tag_message(self, text: &str) -> String {
        format!("[{} 관련 질문] {text}", self.display_name())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.slug() == s)
            .ok_or_else(|| CategoryError::Unknown(s.to_owned()))
    }
}

#[cfg(test)]
#[path = "category_test.rs"]
mod tests;
