//! Instruction text sent alongside the photo.

use crate::headshot::options::{BackgroundTone, GenderHint, Locale, TransformOptions};

/// Builds the editing instruction for `options`.
///
/// Names the subject, backdrop and suit color, and always asks for identity
/// preservation, even studio lighting and a high-resolution result.
pub fn build_instruction(options: &TransformOptions) -> String {
    match options.locale {
        Locale::En => english(options),
        Locale::Ko => korean(options),
    }
}

/// Message shown to the user whenever a transform fails, whatever the cause.
pub fn failure_message(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Something went wrong while converting your photo. Please try again.",
        Locale::Ko => "사진 변환 중 오류가 발생했습니다. 다시 시도해 주세요.",
    }
}

fn english(options: &TransformOptions) -> String {
    let subject = match options.gender {
        GenderHint::Male => "man",
        GenderHint::Female => "woman",
        GenderHint::Unspecified => "person",
    };
    let backdrop = match options.background {
        BackgroundTone::White => "clean white",
        BackgroundTone::Grey => "soft grey",
    };
    let suit = options.suit_color.describe(Locale::En);

    format!(
        "Retouch the {subject} in this photo into a natural-looking professional resume headshot.\n\
         \n\
         Requirements:\n\
         1. Background: replace it with a {backdrop} studio backdrop.\n\
         2. Attire: dress the subject in a neat {suit} business suit with a shirt or blouse.\n\
         3. Lighting: apply bright, even lighting as if shot in a professional photo studio.\n\
         4. Identity: preserve the subject's facial features, face shape and identity as closely as possible while giving a trustworthy impression.\n\
         5. Quality: produce a sharp, high-resolution portrait."
    )
}

fn korean(options: &TransformOptions) -> String {
    let subject = match options.gender {
        GenderHint::Male => "남성",
        GenderHint::Female => "여성",
        GenderHint::Unspecified => "사람",
    };
    let backdrop = match options.background {
        BackgroundTone::White => "깔끔한 흰색",
        BackgroundTone::Grey => "부드러운 회색",
    };
    let suit = options.suit_color.describe(Locale::Ko);

    format!(
        "이 사진 속 {subject}을 전문 취업 증명사진 스타일로 자연스럽게 보정해줘.\n\
         \n\
         주요 요구 사항:\n\
         1. 배경: {backdrop} 스튜디오 배경으로 변경.\n\
         2. 복장: 단정한 {suit} 비즈니스 정장(수트와 셔츠/블라우스)을 입은 모습으로 합성.\n\
         3. 조명: 전문 사진 스튜디오에서 촬영한 것 같은 화사하고 고른 조명 적용.\n\
         4. 유지: 이목구비와 얼굴형, 정체성을 최대한 유지하면서 신뢰감 있는 인상으로 개선.\n\
         5. 품질: 고해상도의 선명한 인물 사진으로 생성."
    )
}
